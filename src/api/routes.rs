//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    full_dataset, health, list_communes, list_provinces, metrics, openapi, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Reference data
        .route("/tinh", get(list_provinces))
        .route("/xa/:mahc", get(list_communes))
        .route("/full", get(full_dataset))
        // Operations
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Open CORS policy: any origin, method and header, with credentials.
///
/// Credentials rule out the `*` wildcard, so request values are echoed back.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
