//! HTTP API handlers.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::debug;
use utoipa::OpenApi;

use crate::dataset::ReferenceData;
use crate::error::ApiError;
use crate::metrics::{inc_commune_lookup_misses, LatencyTimer};

use super::docs::ApiDoc;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dataset loaded at startup, never mutated.
    pub data: Arc<ReferenceData>,
    /// Prometheus handle, when the recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a loaded dataset.
    pub fn new(data: ReferenceData) -> Self {
        Self {
            data: Arc::new(data),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
    /// Number of province records loaded.
    pub records: usize,
}

/// List every province entry in dataset order.
#[utoipa::path(
    get,
    path = "/tinh",
    tag = "dvhc",
    responses((status = 200, description = "Province entries in dataset order"))
)]
pub async fn list_provinces(State(state): State<AppState>) -> Response {
    let _timer = LatencyTimer::new("/tinh");
    Json(state.data.provinces().collect::<Vec<_>>()).into_response()
}

/// List the communes of one province; `[]` when the code is unknown.
#[utoipa::path(
    get,
    path = "/xa/{mahc}",
    tag = "dvhc",
    params(("mahc" = i64, Path, description = "Integer administrative code of the province, any magnitude")),
    responses(
        (status = 200, description = "Commune entries of the matching province, or an empty array"),
        (status = 422, description = "mahc is not an integer")
    )
)]
pub async fn list_communes(
    State(state): State<AppState>,
    mahc: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let _timer = LatencyTimer::new("/xa/{mahc}");
    let Path(raw) = mahc.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    let code = integer_code(&raw).ok_or_else(|| {
        ApiError::Unprocessable(format!("mahc: input should be a valid integer, got {raw:?}"))
    })?;

    let communes = state.data.communes(&code);
    if communes.is_empty() {
        debug!(mahc = %code, "No province matches code");
        inc_commune_lookup_misses();
    }

    Ok(Json(communes).into_response())
}

/// Canonical decimal form of an integer path segment: optional sign,
/// digits only, no leading zeros, `-0` folded to `0`. No range limit.
pub fn integer_code(raw: &str) -> Option<String> {
    let (negative, digits) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let trimmed = digits.trim_start_matches('0');
    Some(match (trimmed.is_empty(), negative) {
        (true, _) => "0".to_string(),
        (false, true) => format!("-{trimmed}"),
        (false, false) => trimmed.to_string(),
    })
}

/// Return the whole dataset unchanged.
#[utoipa::path(
    get,
    path = "/full",
    tag = "dvhc",
    responses((status = 200, description = "Every record as loaded from the data file"))
)]
pub async fn full_dataset(State(state): State<AppState>) -> Response {
    let _timer = LatencyTimer::new("/full");
    Json(state.data.full()).into_response()
}

/// Health check handler - always returns 200 once serving.
#[utoipa::path(
    get,
    path = "/health",
    tag = "ops",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        records: state.data.len(),
    })
}

/// Prometheus text exposition; 503 when the recorder is not installed.
pub async fn metrics(State(state): State<AppState>) -> Result<String, ApiError> {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .ok_or(ApiError::MetricsUnavailable)
}

/// Generated OpenAPI document.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
