// src/extract.rs
//! Sentence splitting and per-category ESG content extraction (input for sentiment).

use crate::lexicon::{Category, Lexicon};
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of characters of extracted content handed to sentiment scoring.
pub const MAX_EXTRACT_CHARS: usize = 1000;

const SENTENCE_JOIN: &str = ". ";

static RE_SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence regex"));

/// Split on `.`, `!`, `?` (runs collapse into one boundary); returns trimmed,
/// non-empty sentences in document order.
pub fn split_sentences(text: &str) -> Vec<&str> {
    RE_SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// True if the sentence mentions any keyword of the category (case-insensitive).
pub(crate) fn mentions_category(lexicon: &Lexicon, lowered: &str, category: Category) -> bool {
    lexicon
        .keywords(category)
        .iter()
        .any(|kw| kw.is_in(lowered))
}

/// Truncate to the first `max` characters (not bytes, not sentence-aware).
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Join every category-relevant sentence with ". " and cap at 1000 characters.
/// Fragments keep their surrounding whitespace. Returns an empty string when
/// nothing matches.
pub fn extract(lexicon: &Lexicon, text: &str, category: Category) -> String {
    let kept: Vec<&str> = RE_SENTENCE_END
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .filter(|s| mentions_category(lexicon, &s.to_lowercase(), category))
        .collect();

    let joined = kept.join(SENTENCE_JOIN);
    truncate_chars(&joined, MAX_EXTRACT_CHARS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon;

    #[test]
    fn splits_and_collapses_punctuation() {
        let s = split_sentences("First one!!! Second?  ...Third.  ");
        assert_eq!(s, vec!["First one", "Second", "Third"]);
        assert!(split_sentences(" ... !? ").is_empty());
    }

    #[test]
    fn keeps_only_matching_sentences() {
        let text = "We cut Carbon output. Revenue was flat. Water use fell!";
        let out = extract(lexicon::global(), text, Category::Environmental);
        assert_eq!(out, "We cut Carbon output.  Water use fell");
    }

    #[test]
    fn fragments_are_joined_untrimmed() {
        let text = "Carbon up. Board met.   Water down!  ";
        let out = extract(lexicon::global(), text, Category::Environmental);
        assert_eq!(out, "Carbon up.    Water down");
    }

    #[test]
    fn no_match_gives_empty_string() {
        let out = extract(lexicon::global(), "Revenue was flat.", Category::Governance);
        assert!(out.is_empty());
    }

    #[test]
    fn truncates_to_thousand_chars() {
        let sentence = format!("carbon {}", "é".repeat(600));
        let text = format!("{sentence}. {sentence}.");
        let out = extract(lexicon::global(), &text, Category::Environmental);
        assert_eq!(out.chars().count(), MAX_EXTRACT_CHARS);
        assert!(out.starts_with("carbon "));
    }
}
