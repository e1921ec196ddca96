use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use semantic::SemanticError;

use crate::types::MatchError;

/// Metrics observer for the matching engine.
pub trait MatchMetrics: Send + Sync {
    fn record_build(&self, latency: Duration, result: Result<(), &MatchError>);
    fn record_match(&self, latency: Duration, hits: usize);
    fn record_embedding_failure(&self, error: &SemanticError);
}

/// Install or clear the global match metrics recorder.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Latency span that reports to the installed recorder, if any.
pub(crate) struct MetricsSpan {
    recorder: Arc<dyn MatchMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    pub(crate) fn record_build(self, result: Result<(), &MatchError>) {
        self.recorder.record_build(self.start.elapsed(), result);
    }

    pub(crate) fn record_match(self, hits: usize) {
        self.recorder.record_match(self.start.elapsed(), hits);
    }
}
