//! Metrics collection and exposition.
//!
//! # Metrics
//! - `base_urls_requests_total` (counter): requests seen by the layer, by outcome
//! - `base_urls_metadata_extractions_total` (counter): endpoint metadata extractions
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter is opt-in (`observability.metrics_enabled`)

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record how the layer handled one request.
pub fn record_request(outcome: &'static str) {
    counter!("base_urls_requests_total", "outcome" => outcome).increment(1);
}

/// Record one endpoint metadata extraction.
pub fn record_metadata_extraction() {
    counter!("base_urls_metadata_extractions_total").increment(1);
}
