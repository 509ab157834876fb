//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rain_requests_total` (counter): requests by method, path, status
//! - `rain_request_duration_seconds` (histogram): latency distribution
//! - `rain_observations_recorded_total` (counter): writes by rain value
//! - `rain_store_errors_total` (counter): store faults by operation
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus exporter serves its own HTTP listener

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("rain_requests_total", &labels).increment(1);
    metrics::histogram!("rain_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record a persisted observation.
pub fn record_observation(rained: bool) {
    metrics::counter!("rain_observations_recorded_total", "rain" => rained.to_string()).increment(1);
}

/// Record a store fault.
pub fn record_store_error(operation: &'static str) {
    metrics::counter!("rain_store_errors_total", "operation" => operation).increment(1);
}

/// Middleware recording request count and latency.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &path, response.status().as_u16(), start);
    response
}
