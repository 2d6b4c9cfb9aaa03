//! Metrics collection.
//!
//! # Metrics
//! - `marketplace_requests_total` (counter): façade calls by operation, outcome
//! - `marketplace_request_duration_seconds` (histogram): latency by operation
//! - `marketplace_dropped_items_total` (counter): records excluded during
//!   normalization, by operation
//!
//! # Design Decisions
//! - Uses the `metrics` facade; no exporter is installed by this crate
//! - Outcome label is `ok` or the error kind

use std::time::Instant;

/// Record one completed façade call.
pub fn record_operation(operation: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "marketplace_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "marketplace_request_duration_seconds",
        "operation" => operation
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a record dropped by the normalizer.
pub fn record_dropped_item(operation: &'static str) {
    metrics::counter!("marketplace_dropped_items_total", "operation" => operation).increment(1);
}
