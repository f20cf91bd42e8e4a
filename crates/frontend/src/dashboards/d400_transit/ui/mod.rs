pub mod dashboard;

pub use dashboard::TransitPage;
