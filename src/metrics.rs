//! Request metrics
//!
//! Counters and a latency histogram for chat round trips, recorded through
//! the `metrics` facade. Without an installed recorder they are no-ops.

use anyhow::{Context, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// Process-wide Prometheus handle, installed at most once
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder (idempotent) and describe metrics
pub fn init_metrics() -> Result<&'static PrometheusHandle> {
    let handle = PROMETHEUS_HANDLE.get_or_try_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")
    })?;

    register_metrics();
    Ok(handle)
}

/// Render current metrics in Prometheus text format
///
/// Returns `None` when [`init_metrics`] has not been called.
pub fn render() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|h| h.render())
}

fn register_metrics() {
    ::metrics::describe_counter!("parley_requests_total", "Total number of chat requests");
    ::metrics::describe_counter!(
        "parley_errors_total",
        "Total number of failed chat requests"
    );
    ::metrics::describe_histogram!(
        "parley_request_duration_seconds",
        "Chat request latency in seconds"
    );
}

/// Record a chat request being issued
pub fn record_request(model: &str) {
    ::metrics::counter!("parley_requests_total", "model" => model.to_string()).increment(1);
}

/// Record the latency of a finished chat request
pub fn record_duration(model: &str, duration_secs: f64) {
    ::metrics::histogram!("parley_request_duration_seconds", "model" => model.to_string())
        .record(duration_secs);
}

/// Record a failed chat request
pub fn record_error(kind: &'static str) {
    ::metrics::counter!("parley_errors_total", "kind" => kind).increment(1);
}
