// src/sentiment/lexical.rs
//! Reference sentiment backend: positive/negative word tallies with intensifier
//! bonuses. Fully synchronous; the async trait impl never suspends.

use super::{SentimentBackend, SentimentResult, NEUTRAL_SCORE};
use crate::error::AnalysisError;
use crate::lexicon::{self, Lexicon};
use async_trait::async_trait;

const INTENSIFIER_BONUS: f64 = 0.5;
const INTENSITY_STEP: f64 = 0.1;
const MAX_INTENSITY: f64 = 1.5;

/// Lower-case, replace every non-word/non-space char with a space, split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Running tallies for one text.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Tally {
    pub positive: f64,
    pub negative: f64,
    pub intensifiers: u32,
}

impl Tally {
    /// Fold the tallies into a score in [0,1]; 0.5 when no sentiment word was seen.
    pub fn score(&self) -> f64 {
        let total = self.positive + self.negative;
        if total == 0.0 {
            return NEUTRAL_SCORE;
        }
        let ratio = self.positive / total;
        let multiplier =
            (1.0 + self.intensifiers as f64 * INTENSITY_STEP).min(MAX_INTENSITY);
        (ratio * multiplier).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LexiconSentiment {
    lexicon: &'static Lexicon,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new(lexicon::global())
    }
}

impl LexiconSentiment {
    pub fn new(lexicon: &'static Lexicon) -> Self {
        Self { lexicon }
    }

    /// Walk every token. A sentiment word directly followed by an intensifier gets a
    /// +0.5 bonus and bumps the intensifier count; the intensifier is still visited
    /// on its own turn and counted again there.
    pub fn tally(&self, tokens: &[String]) -> Tally {
        let lex = self.lexicon;
        let mut t = Tally::default();

        for (i, word) in tokens.iter().enumerate() {
            let slot = if lex.is_positive(word) {
                &mut t.positive
            } else if lex.is_negative(word) {
                &mut t.negative
            } else {
                if lex.is_intensifier(word) {
                    t.intensifiers += 1;
                }
                continue;
            };

            *slot += 1.0;
            if tokens.get(i + 1).is_some_and(|next| lex.is_intensifier(next)) {
                *slot += INTENSIFIER_BONUS;
                t.intensifiers += 1;
            }
        }
        t
    }

    /// Synchronous scoring entry point.
    pub fn score_text(&self, text: &str) -> SentimentResult {
        let tokens = tokenize(text);
        SentimentResult::from_score(self.tally(&tokens).score())
    }
}

#[async_trait]
impl SentimentBackend for LexiconSentiment {
    async fn analyze(&self, text: &str) -> Result<SentimentResult, AnalysisError> {
        Ok(self.score_text(text))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
