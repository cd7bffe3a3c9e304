//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_store_writes_total` (counter): store writes by outcome
//!   (stored, duplicate, invalid)
//! - `relay_store_reads_total` (counter): listing snapshots taken
//! - `relay_store_messages` (gauge): size of the last snapshot
//! - `relay_store_attempts_total` (counter): facade → store attempts by outcome
//! - `relay_facade_requests_total` (counter): facade requests by route, status
//! - `relay_facade_request_duration_seconds` (histogram): facade latency
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with an HTTP scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_store_write(outcome: &'static str) {
    counter!("relay_store_writes_total", "outcome" => outcome).increment(1);
}

pub fn record_store_read(count: usize) {
    counter!("relay_store_reads_total").increment(1);
    gauge!("relay_store_messages").set(count as f64);
}

pub fn record_store_attempt(outcome: &'static str) {
    counter!("relay_store_attempts_total", "outcome" => outcome).increment(1);
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!(
        "relay_facade_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("relay_facade_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}
