//! Prometheus metrics for request latency and dataset lookups.
//!
//! This module provides:
//! - HTTP request counters and latency histograms per endpoint
//! - A gauge of loaded province records
//! - A counter of commune lookups that matched nothing

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::Result;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Loaded province records gauge metric name.
pub const METRIC_DATASET_RECORDS: &str = "dataset_records";
/// Commune lookup misses counter metric name.
pub const METRIC_COMMUNE_LOOKUP_MISSES: &str = "commune_lookup_misses_total";

/// Install the Prometheus recorder and register metric descriptions.
/// Call this once at startup; a second install fails.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

fn describe_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_gauge!(
        METRIC_DATASET_RECORDS,
        "Number of province records loaded at startup"
    );
    describe_counter!(
        METRIC_COMMUNE_LOOKUP_MISSES,
        "Commune lookups whose code matched no province"
    );

    debug!("Metrics initialized");
}

/// Record the number of loaded province records.
pub fn set_dataset_records(count: usize) {
    gauge!(METRIC_DATASET_RECORDS).set(count as f64);
}

/// Increment the commune lookup miss counter.
pub fn inc_commune_lookup_misses() {
    counter!(METRIC_COMMUNE_LOOKUP_MISSES).increment(1);
}

/// RAII guard for timing a request to one endpoint.
/// Records the request count and latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Start timing a request to `endpoint`.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        counter!(METRIC_HTTP_REQUESTS, "endpoint" => self.endpoint).increment(1);
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint).record(latency_ms);
    }
}
