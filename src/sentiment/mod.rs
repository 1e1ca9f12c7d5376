// src/sentiment/mod.rs
//! Sentiment contract shared by every backend.
//!
//! A backend only produces a raw score in [0,1]; label and confidence always come
//! from [`label_for_score`], including for the three-category aggregate.

pub mod lexical;
pub mod model;

use crate::error::AnalysisError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use lexical::LexiconSentiment;
pub use model::{HttpSentimentModel, ModelBackend, SentimentModel};

pub const POSITIVE_THRESHOLD: f64 = 0.6;
pub const NEGATIVE_THRESHOLD: f64 = 0.4;
/// Score (and confidence) reported when nothing sentiment-bearing is found.
pub const NEUTRAL_SCORE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// Map a raw score to (label, confidence). Both thresholds are strict, so 0.6 and
/// 0.4 are neutral.
pub fn label_for_score(score: f64) -> (SentimentLabel, f64) {
    if score > POSITIVE_THRESHOLD {
        (SentimentLabel::Positive, score)
    } else if score < NEGATIVE_THRESHOLD {
        (SentimentLabel::Negative, 1.0 - score)
    } else {
        (SentimentLabel::Neutral, NEUTRAL_SCORE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub score: f64,
    #[serde(alias = "sentiment")]
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl SentimentResult {
    /// Build from a raw backend score; non-finite scores are treated as neutral.
    pub fn from_score(score: f64) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            NEUTRAL_SCORE
        };
        let (label, confidence) = label_for_score(score);
        Self {
            score,
            label,
            confidence,
        }
    }

    pub fn neutral() -> Self {
        Self::from_score(NEUTRAL_SCORE)
    }
}

/// Per-category sentiment plus the folded overall figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EsgSentiment {
    pub environmental: SentimentResult,
    pub social: SentimentResult,
    pub governance: SentimentResult,
    pub overall: SentimentResult,
}

/// Mean score and mean confidence; the label is re-derived from the mean score,
/// never voted from the three sub-labels.
pub fn aggregate_esg(
    environmental: SentimentResult,
    social: SentimentResult,
    governance: SentimentResult,
) -> EsgSentiment {
    let score = (environmental.score + social.score + governance.score) / 3.0;
    let confidence =
        (environmental.confidence + social.confidence + governance.confidence) / 3.0;
    let (label, _) = label_for_score(score);

    EsgSentiment {
        environmental,
        social,
        governance,
        overall: SentimentResult {
            score,
            label,
            confidence,
        },
    }
}

/// Capability implemented by every sentiment backend.
#[async_trait]
pub trait SentimentBackend: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<SentimentResult, AnalysisError>;

    /// Score the three category texts concurrently and fold them.
    async fn analyze_esg(
        &self,
        environmental: &str,
        social: &str,
        governance: &str,
    ) -> Result<EsgSentiment, AnalysisError> {
        let (env, soc, gov) = tokio::join!(
            self.analyze(environmental),
            self.analyze(social),
            self.analyze(governance)
        );
        Ok(aggregate_esg(env?, soc?, gov?))
    }

    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;
}
