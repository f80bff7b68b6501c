//! OpenAPI document for the HTTP API.

use utoipa::OpenApi;

use super::handlers;

/// OpenAPI description served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "dvhc-api",
        description = "Vietnamese administrative divisions: provinces (tinh) and communes (xa)"
    ),
    paths(
        handlers::list_provinces,
        handlers::list_communes,
        handlers::full_dataset,
        handlers::health
    ),
    tags(
        (name = "dvhc", description = "Reference data lookups"),
        (name = "ops", description = "Operational endpoints")
    )
)]
pub struct ApiDoc;
