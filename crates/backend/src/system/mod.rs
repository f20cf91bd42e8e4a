pub mod auth;
pub mod handlers;
pub mod initialization;
pub mod middleware;
pub mod profiles;
pub mod tracing;
pub mod users;
