//! Prometheus wiring for matcher and HTTP metrics.

use std::time::Duration;

use matcher::{MatchError, MatchMetrics};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use semantic::SemanticError;

static PROMETHEUS: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder once and return its render handle.
///
/// Returns `None` if another recorder already owns the global slot.
pub fn install_recorder() -> Option<&'static PrometheusHandle> {
    PROMETHEUS
        .get_or_try_init(|| PrometheusBuilder::new().install_recorder())
        .map_err(|err| tracing::warn!(error = %err, "prometheus recorder not installed"))
        .ok()
}

/// Render the current metrics in Prometheus text format.
pub fn render() -> Option<String> {
    PROMETHEUS.get().map(PrometheusHandle::render)
}

/// Forwards matcher events to the `metrics` facade.
#[derive(Debug, Default)]
pub struct PrometheusMatchMetrics;

impl MatchMetrics for PrometheusMatchMetrics {
    fn record_build(&self, latency: Duration, result: Result<(), &MatchError>) {
        let outcome = if result.is_ok() { "ok" } else { "error" };
        counter!("vibematcher_builds_total", "outcome" => outcome).increment(1);
        histogram!("vibematcher_build_seconds").record(latency.as_secs_f64());
    }

    fn record_match(&self, latency: Duration, hits: usize) {
        counter!("vibematcher_matches_total").increment(1);
        histogram!("vibematcher_match_seconds").record(latency.as_secs_f64());
        histogram!("vibematcher_match_hits").record(hits as f64);
    }

    fn record_embedding_failure(&self, _error: &SemanticError) {
        counter!("vibematcher_embedding_failures_total").increment(1);
    }
}

pub(crate) fn record_http(method: &str, status: u16, latency: Duration) {
    counter!(
        "vibematcher_http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("vibematcher_http_request_seconds").record(latency.as_secs_f64());
}
