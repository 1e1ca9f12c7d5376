// src/relevance.rs
//! Weighted keyword relevance per ESG category (0–100).
//!
//! score = min(round(Σ(count/total_words · weight · 1000) · found/keywords), 100)

use crate::lexicon::{Category, Lexicon};
use tracing::debug;

/// Scale applied to term frequency before weighting.
pub const FREQUENCY_SCALE: f64 = 1000.0;
pub const MAX_RELEVANCE: u32 = 100;

pub const ENV_DEV_LOG: &str = "ESG_DEV_LOG";

// Dev logging gate: ESG_DEV_LOG=1 AND dev env (debug or SHUTTLE_ENV in {local,development,dev})
pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Short anonymous id for a text (first 6 bytes of SHA-256, hex).
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Result of relevance evaluation for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Relevance {
    pub score: u32,
    pub matched: Vec<String>,
    pub total_words: usize,
}

impl Default for Relevance {
    fn default() -> Self {
        Self {
            score: 0,
            matched: Vec::new(),
            total_words: 0,
        }
    }
}

/// Scores text against the category tables of a lexicon.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceEngine<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> RelevanceEngine<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Relevance score in [0, 100].
    pub fn score(&self, text: &str, category: Category) -> u32 {
        self.evaluate(text, category).score
    }

    /// Full evaluation: score plus the keywords that contributed.
    pub fn evaluate(&self, text: &str, category: Category) -> Relevance {
        let lowered = text.to_lowercase();
        let total_words = lowered.split_whitespace().count();
        if total_words == 0 {
            return Relevance::default();
        }

        let keywords = self.lexicon.keywords(category);
        let mut raw = 0.0f64;
        let mut matched = Vec::new();

        for kw in keywords {
            let count = kw.count_in(&lowered);
            if count == 0 {
                continue;
            }
            let tf = count as f64 / total_words as f64;
            raw += tf * kw.weight * FREQUENCY_SCALE;
            matched.push(kw.term.clone());
        }

        if matched.is_empty() {
            return Relevance {
                score: 0,
                matched,
                total_words,
            };
        }

        let coverage = matched.len() as f64 / keywords.len() as f64;
        let normalized = raw * coverage;
        let score = (normalized.round() as u32).min(MAX_RELEVANCE);

        if dev_logging_enabled() {
            debug!(
                target: "relevance",
                id = %anon_hash(text),
                %category,
                score,
                total_words,
                matched = ?matched
            );
        }

        Relevance {
            score,
            matched,
            total_words,
        }
    }
}
