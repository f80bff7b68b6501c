//! HTTP API module for reference data, health, metrics and docs endpoints.

pub mod docs;
pub mod handlers;
pub mod routes;

pub use docs::ApiDoc;
pub use handlers::AppState;
pub use routes::{cors_layer, create_router};
