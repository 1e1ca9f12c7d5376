// tests/pipeline_e2e.rs
//
// End-to-end runs of the analysis pipeline on the built-in lexicon.

use async_trait::async_trait;
use esg_analyzer::fetch::{FetchError, PageFetcher};
use esg_analyzer::lexicon;
use esg_analyzer::sentiment::{ModelBackend, SentimentModel};
use esg_analyzer::{AnalysisError, EsgAnalyzer, SentimentLabel};
use std::sync::Arc;

const MIXED: &str = "The company reports strong carbon emissions reduction and excellent \
diversity and inclusion training, but suffered a governance compliance violation and penalty.";

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

struct StaticPage(&'static str);

#[async_trait]
impl PageFetcher for StaticPage {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Ok(self.0.to_string())
    }
    fn name(&self) -> &'static str {
        "static"
    }
}

struct DownPage;

#[async_trait]
impl PageFetcher for DownPage {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Err(FetchError::Status(503))
    }
    fn name(&self) -> &'static str {
        "down"
    }
}

struct ConstModel(f64);

#[async_trait]
impl SentimentModel for ConstModel {
    async fn predict(&self, _text: &str) -> anyhow::Result<f64> {
        Ok(self.0)
    }
    fn name(&self) -> &'static str {
        "const"
    }
}

#[tokio::test]
async fn mixed_disclosure_end_to_end() {
    let r = EsgAnalyzer::default().analyze(MIXED).await.expect("analysis");

    // 21 words; env: carbon+emissions, social: diversity+inclusion+training,
    // governance: governance+compliance.
    assert_eq!(r.relevance.environmental, 19);
    assert_eq!(r.relevance.social, 35);
    assert_eq!(r.relevance.governance, 18);
    assert_eq!(r.score, 24);
    assert_eq!(
        r.environmental,
        "Score: 19/100 - Limited environmental disclosure and practices identified."
    );
    assert!(r.summary.starts_with("Limited ESG disclosure"));

    // Same sentence feeds all three: 6 positive vs 2 negative words → 0.75.
    for s in [r.sentiment.environmental, r.sentiment.social, r.sentiment.governance] {
        assert!(approx(s.score, 0.75), "{s:?}");
        assert_eq!(s.label, SentimentLabel::Positive);
    }
    assert!(approx(r.sentiment.overall.score, 0.75));
    assert_eq!(r.sentiment.overall.label, SentimentLabel::Positive);

    let gov = &r.negative_snippets.governance;
    assert_eq!(gov.len(), 1);
    assert!(gov[0].contains("violation") && gov[0].contains("compliance"));
}

#[tokio::test]
async fn identical_input_gives_identical_bytes() {
    let analyzer = EsgAnalyzer::default();
    let text = format!("{MIXED} Water use fell sharply! Board oversight is weak?");
    let a = serde_json::to_vec(&analyzer.analyze(&text).await.unwrap()).unwrap();
    let b = serde_json::to_vec(&analyzer.analyze(&text).await.unwrap()).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn empty_text_degrades_to_zero_and_neutral() {
    let r = EsgAnalyzer::default().analyze("").await.unwrap();
    assert_eq!(r.score, 0);
    assert_eq!(r.sentiment.overall.score, 0.5);
    assert_eq!(r.sentiment.overall.label, SentimentLabel::Neutral);
    assert_eq!(r.sentiment.overall.confidence, 0.5);
    assert!(r.negative_snippets.environmental.is_empty());
}

#[tokio::test]
async fn url_analysis_uses_the_fetcher() {
    let analyzer = EsgAnalyzer::default();
    let via_url = analyzer
        .analyze_url(&StaticPage(MIXED), "https://example.com/esg")
        .await
        .unwrap();
    let direct = analyzer.analyze(MIXED).await.unwrap();
    assert_eq!(via_url, direct);
}

#[tokio::test]
async fn fetch_errors_surface_unchanged() {
    let err = EsgAnalyzer::default()
        .analyze_url(&DownPage, "https://example.com/esg")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Fetch(FetchError::Status(503))));
}

#[tokio::test]
async fn model_backend_plugs_into_same_contract() {
    let backend = ModelBackend::with_model(Arc::new(ConstModel(0.2)));
    let analyzer = EsgAnalyzer::new(lexicon::global(), Arc::new(backend));
    let r = analyzer.analyze(MIXED).await.unwrap();

    assert_eq!(r.sentiment.governance.label, SentimentLabel::Negative);
    assert!(approx(r.sentiment.governance.confidence, 0.8));
    assert_eq!(r.sentiment.overall.label, SentimentLabel::Negative);
    // Relevance does not depend on the sentiment backend.
    assert_eq!(r.score, 24);
}
