use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::{handlers, system};

/// Protected routes sit behind `require_auth`; the SPA bundle is the fallback
pub fn configure_routes() -> Router {
    let protected = Router::new()
        .route("/api/system/auth/me", get(system::handlers::auth::current_user))
        .route(
            "/api/system/profile/me",
            get(system::handlers::profile::my_profile),
        )
        // A001 Shipment handlers
        .route("/api/a001/shipments", get(handlers::a001_shipment::list_all))
        .route(
            "/api/a001/shipments/batch",
            post(handlers::a001_shipment::import_batch),
        )
        .route(
            "/api/a001/shipments/export",
            get(handlers::a001_shipment::export_csv),
        )
        .layer(middleware::from_fn(system::auth::middleware::require_auth));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        .merge(protected)
        .fallback_service(ServeDir::new("dist"))
}
