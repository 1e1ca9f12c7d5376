// src/analyze.rs
//! Analysis pipeline entry: relevance, extraction and snippet mining per category,
//! concurrent sentiment over the extracts, then aggregation.

use crate::config::{AnalyzerConfig, BackendKind};
use crate::engine::{build_result, AnalysisResult, PerCategory};
use crate::error::AnalysisError;
use crate::extract::extract;
use crate::fetch::PageFetcher;
use crate::lexicon::{self, Lexicon};
use crate::metrics;
use crate::relevance::{anon_hash, dev_logging_enabled, RelevanceEngine};
use crate::sentiment::{
    HttpSentimentModel, LexiconSentiment, ModelBackend, SentimentBackend,
};
use crate::snippets::mine;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Pick the sentiment implementation named by the config.
///
/// The model backend is returned even without an endpoint; it then fails every call
/// with `BackendUninitialized` until a model is installed.
pub fn build_backend(cfg: &AnalyzerConfig) -> anyhow::Result<Arc<dyn SentimentBackend>> {
    match cfg.sentiment_backend {
        BackendKind::Lexicon => Ok(Arc::new(LexiconSentiment::default())),
        BackendKind::Model => {
            let backend = ModelBackend::new();
            match cfg.model_endpoint.as_deref() {
                Some(endpoint) => {
                    let model = HttpSentimentModel::new(
                        endpoint,
                        Duration::from_millis(cfg.model_timeout_ms),
                    )?;
                    backend.install(Arc::new(model))?;
                }
                None => warn!("model sentiment backend selected without model_endpoint"),
            }
            Ok(Arc::new(backend))
        }
    }
}

/// Stateless per call; holds only the shared lexicon and the sentiment backend.
#[derive(Clone)]
pub struct EsgAnalyzer {
    lexicon: &'static Lexicon,
    backend: Arc<dyn SentimentBackend>,
}

impl Default for EsgAnalyzer {
    fn default() -> Self {
        Self::new(lexicon::global(), Arc::new(LexiconSentiment::default()))
    }
}

impl EsgAnalyzer {
    pub fn new(lexicon: &'static Lexicon, backend: Arc<dyn SentimentBackend>) -> Self {
        Self { lexicon, backend }
    }

    pub fn from_config(cfg: &AnalyzerConfig) -> anyhow::Result<Self> {
        Ok(Self::new(lexicon::global(), build_backend(cfg)?))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Analyze plain text.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        let lex = self.lexicon;
        let relevance_engine = RelevanceEngine::new(lex);

        let relevance = PerCategory::from_fn(|c| relevance_engine.score(text, c));
        let extracts = PerCategory::from_fn(|c| extract(lex, text, c));
        let snippets = PerCategory::from_fn(|c| mine(lex, text, c));

        let sentiment = self
            .backend
            .analyze_esg(
                &extracts.environmental,
                &extracts.social,
                &extracts.governance,
            )
            .await
            .map_err(|e| {
                warn!(error = %e, backend = self.backend.name(), "sentiment analysis failed");
                metrics::record_failure();
                e.at_boundary()
            })?;

        let result = build_result(relevance, sentiment, snippets);
        metrics::record_analysis(&result, started.elapsed());

        if dev_logging_enabled() {
            // Never log raw text. Only hashed id + scores.
            info!(
                target: "analysis",
                id = %anon_hash(text),
                score = result.score,
                sentiment = ?result.sentiment.overall.label,
                backend = self.backend.name()
            );
        }

        Ok(result)
    }

    /// Fetch a page through the collaborator, then analyze its text.
    pub async fn analyze_url(
        &self,
        fetcher: &dyn PageFetcher,
        url: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let text = fetcher.fetch(url).await.map_err(|e| {
            warn!(error = %e, fetcher = fetcher.name(), "page fetch failed");
            metrics::record_failure();
            AnalysisError::Fetch(e)
        })?;
        self.analyze(&text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentLabel;

    #[test]
    fn config_selects_backend() {
        let lexicon = build_backend(&AnalyzerConfig::default()).unwrap();
        assert_eq!(lexicon.name(), "lexicon");

        let cfg = AnalyzerConfig {
            sentiment_backend: BackendKind::Model,
            ..AnalyzerConfig::default()
        };
        assert_eq!(build_backend(&cfg).unwrap().name(), "model");
    }

    #[tokio::test]
    async fn uninitialized_model_fails_the_whole_analysis() {
        let cfg = AnalyzerConfig {
            sentiment_backend: BackendKind::Model,
            ..AnalyzerConfig::default()
        };
        let analyzer = EsgAnalyzer::from_config(&cfg).unwrap();
        let err = analyzer.analyze("carbon emissions").await.unwrap_err();
        assert!(matches!(err, AnalysisError::BackendUninitialized("model")));
    }

    #[tokio::test]
    async fn text_without_esg_content_is_neutral_and_zero() {
        let r = EsgAnalyzer::default()
            .analyze("Quarterly revenue grew in every region.")
            .await
            .unwrap();
        assert_eq!(r.score, 0);
        assert_eq!(r.sentiment.overall.label, SentimentLabel::Neutral);
        assert!(r.summary.starts_with("Limited ESG disclosure"));
    }
}
