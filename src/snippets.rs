// src/snippets.rs
//! Negative snippet mining: sentences that mention a category keyword together
//! with a negative-indicator phrase.

use crate::extract::{mentions_category, split_sentences, truncate_chars};
use crate::lexicon::{Category, Lexicon};

pub const MAX_SNIPPETS: usize = 5;
pub const MAX_SNIPPET_CHARS: usize = 200;
/// Snippets must be strictly longer than this after trimming/truncation.
pub const MIN_SNIPPET_CHARS: usize = 20;

/// First five qualifying sentences in document order (no ranking).
pub fn mine(lexicon: &Lexicon, text: &str, category: Category) -> Vec<String> {
    let mut out = Vec::new();

    for sentence in split_sentences(text) {
        let lowered = sentence.to_lowercase();
        if !mentions_category(lexicon, &lowered, category)
            || !lexicon.has_negative_indicator(&lowered)
        {
            continue;
        }

        let snippet = truncate_chars(sentence.trim(), MAX_SNIPPET_CHARS).trim();
        if snippet.chars().count() <= MIN_SNIPPET_CHARS {
            continue;
        }

        out.push(snippet.to_string());
        if out.len() == MAX_SNIPPETS {
            break;
        }
    }
    out
}
