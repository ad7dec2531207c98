//! Metrics collection and exposition.
//!
//! # Metrics
//! - `panel_http_requests_total` (counter): requests by method, status
//! - `panel_http_request_duration_seconds` (histogram): latency
//!
//! # Design Decisions
//! - The `metrics` facade keeps call sites free of exporter details
//! - The Prometheus exporter is optional and runs its own listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener. Failure is logged
/// and the panel keeps running without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished HTTP request.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    metrics::counter!(
        "panel_http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("panel_http_request_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}
