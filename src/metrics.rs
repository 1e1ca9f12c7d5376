use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::time::Duration;

use crate::engine::AnalysisResult;
use crate::lexicon::Category;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once per process).
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("esg_analyses_total", "Completed analyses.");
        describe_counter!(
            "esg_analysis_failures_total",
            "Analyses aborted by fetch or sentiment backend errors."
        );
        describe_histogram!("esg_analysis_ms", "Analysis time in milliseconds.");
        describe_gauge!(
            "esg_last_relevance",
            "Relevance score of the most recent analysis, per category."
        );
    });
}

pub(crate) fn record_analysis(result: &AnalysisResult, elapsed: Duration) {
    counter!("esg_analyses_total").increment(1);
    histogram!("esg_analysis_ms").record(elapsed.as_secs_f64() * 1000.0);
    for c in Category::ALL {
        gauge!("esg_last_relevance", "category" => c.as_str())
            .set(*result.relevance.get(c) as f64);
    }
}

pub(crate) fn record_failure() {
    counter!("esg_analysis_failures_total").increment(1);
}
