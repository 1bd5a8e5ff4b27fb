//! Metrics collection and exposition.
//!
//! # Metrics
//! - `urlshort_lookups_total` (counter): lookups by outcome and source
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus endpoint is opt-in via config

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Outcome label for a resolved path.
pub const OUTCOME_RESOLVED: &str = "resolved";
/// Outcome label for a path no source knew.
pub const OUTCOME_UNRESOLVED: &str = "unresolved";
/// Outcome label for a failed lookup.
pub const OUTCOME_ERROR: &str = "error";

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one lookup.
pub fn record_lookup(outcome: &'static str, source: &str) {
    ::metrics::counter!(
        "urlshort_lookups_total",
        "outcome" => outcome,
        "source" => source.to_string()
    )
    .increment(1);
}
