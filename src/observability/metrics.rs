//! Metrics collection and exposition.
//!
//! # Metrics
//! - `app_requests_total` (counter): requests by surface (`page`, `proxy`) and status
//! - `app_request_duration_seconds` (histogram): latency by surface
//!
//! # Design Decisions
//! - Exporter is opt-in (`observability.metrics_enabled`)
//! - Static files are not counted; they never reach a handler

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "app_requests_total";
pub const REQUEST_DURATION: &str = "app_request_duration_seconds";

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(surface: &'static str, status: u16, start: Instant) {
    let status = status.to_string();
    metrics::counter!(REQUESTS_TOTAL, "surface" => surface, "status" => status).increment(1);
    metrics::histogram!(REQUEST_DURATION, "surface" => surface)
        .record(start.elapsed().as_secs_f64());
}
