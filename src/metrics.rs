//! Prometheus metrics for the hero store and HTTP handlers.
//!
//! This module provides:
//! - Document read/write counters
//! - Store error counters labelled by operation
//! - Heroes created counter
//! - HTTP handler latency labelled by endpoint

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::store::StoreOp;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Document reads counter metric name.
pub const METRIC_DOCUMENT_READS: &str = "hero_document_reads_total";
/// Document writes counter metric name.
pub const METRIC_DOCUMENT_WRITES: &str = "hero_document_writes_total";
/// Store errors counter metric name.
pub const METRIC_STORE_ERRORS: &str = "hero_store_errors_total";
/// Heroes created counter metric name.
pub const METRIC_HEROES_CREATED: &str = "heroes_created_total";

/// Install the Prometheus recorder and register metric descriptions.
///
/// Call this once at startup. The returned handle renders `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP handler latency in milliseconds"
    );
    describe_counter!(
        METRIC_DOCUMENT_READS,
        "Total number of hero document reads"
    );
    describe_counter!(
        METRIC_DOCUMENT_WRITES,
        "Total number of hero document writes"
    );
    describe_counter!(
        METRIC_STORE_ERRORS,
        "Total number of failed store operations"
    );
    describe_counter!(
        METRIC_HEROES_CREATED,
        "Total number of heroes created through form submissions"
    );

    debug!("Metrics initialized");
    Ok(handle)
}

/// Increment document reads counter.
pub fn inc_document_reads() {
    counter!(METRIC_DOCUMENT_READS).increment(1);
}

/// Increment document writes counter.
pub fn inc_document_writes() {
    counter!(METRIC_DOCUMENT_WRITES).increment(1);
}

/// Increment store errors counter.
pub fn inc_store_errors(op: StoreOp) {
    let op: &'static str = op.into();
    counter!(METRIC_STORE_ERRORS, "op" => op).increment(1);
}

/// Increment heroes created counter.
pub fn inc_heroes_created() {
    counter!(METRIC_HEROES_CREATED).increment(1);
}

/// RAII guard for timing HTTP handlers.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given endpoint.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Elapsed time in milliseconds, recorded as the latency on drop.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint)
            .record(self.elapsed_ms());
    }
}
