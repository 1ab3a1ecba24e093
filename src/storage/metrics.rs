//! Lookup metrics shared by every catalog backend.

use std::time::Instant;

/// Counter of catalog lookups, labelled by backend, operation and status.
pub const OPERATIONS_TOTAL: &str = "catalog_operations_total";

/// Histogram of catalog lookup latency in milliseconds, same labels.
pub const OPERATION_DURATION_MS: &str = "catalog_operation_duration_ms";

/// Records one catalog lookup that began at `start`.
///
/// `status` is `success` or `error`. Without an installed recorder this is a
/// no-op.
pub fn record_operation_metrics(
    backend: &'static str,
    operation: &'static str,
    start: Instant,
    status: &'static str,
) {
    let labels = [
        ("backend", backend),
        ("operation", operation),
        ("status", status),
    ];
    metrics::counter!(OPERATIONS_TOTAL, &labels).increment(1);
    metrics::histogram!(OPERATION_DURATION_MS, &labels)
        .record(start.elapsed().as_secs_f64() * 1000.0);
}
