//! Unified error types for the reference data service.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration values failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dataset could not be loaded.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading the reference data file.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The data file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path of the data file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The data file is not a valid dataset document.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Path of the data file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Request-time error returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A path or query parameter could not be coerced to its declared type.
    #[error("{0}")]
    Unprocessable(String),

    /// Metrics were requested but no recorder is installed.
    #[error("metrics exporter not installed")]
    MetricsUnavailable,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MetricsUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
