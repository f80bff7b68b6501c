//! Read-only HTTP API for Vietnamese administrative-division reference data.
//!
//! A pre-built JSON file (`ket_qua.json`) holding province ("tinh") records
//! and their communes ("xa") is loaded once at startup and served from memory:
//!
//! ```text
//! GET /tinh        every province entry, in file order
//! GET /xa/{mahc}   communes of the province with that code, [] if none
//! GET /full        the whole file, unchanged
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`dataset`]: Record types, file loading and lookups
//! - [`api`]: HTTP routes, handlers and OpenAPI document
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use dataset::ReferenceData;
pub use error::{Result, ServiceError};
