//! # Aggregation Engine
//! Pure, testable logic that folds per-category relevance, sentiment and snippets
//! into an `AnalysisResult`. No I/O.
//!
//! Policy: overall score is the rounded mean of the three relevance scores; summaries
//! use four tiers on the unrounded mean (>=80, >=60, >=40, below).

use crate::lexicon::Category;
use crate::sentiment::EsgSentiment;
use serde::{Deserialize, Serialize};

/// One value per ESG category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerCategory<T> {
    pub environmental: T,
    pub social: T,
    pub governance: T,
}

impl<T> PerCategory<T> {
    /// Build by evaluating `f` for each category in fixed order.
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            environmental: f(Category::Environmental),
            social: f(Category::Social),
            governance: f(Category::Governance),
        }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Environmental => &self.environmental,
            Category::Social => &self.social,
            Category::Governance => &self.governance,
        }
    }
}

pub type RelevanceScores = PerCategory<u32>;
pub type NegativeSnippets = PerCategory<Vec<String>>;

/// Final response of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub environmental: String,
    pub social: String,
    pub governance: String,
    pub score: u32,
    pub summary: String,
    pub relevance: RelevanceScores,
    pub sentiment: EsgSentiment,
    pub negative_snippets: NegativeSnippets,
}

/// Unrounded mean of the three relevance scores.
pub fn mean_relevance(scores: &RelevanceScores) -> f64 {
    (scores.environmental + scores.social + scores.governance) as f64 / 3.0
}

pub fn overall_score(scores: &RelevanceScores) -> u32 {
    mean_relevance(scores).round() as u32
}

pub fn overall_summary(avg: f64) -> &'static str {
    if avg >= 80.0 {
        "Excellent ESG practices with comprehensive coverage across all areas."
    } else if avg >= 60.0 {
        "Good ESG implementation with room for improvement in some areas."
    } else if avg >= 40.0 {
        "Moderate ESG practices. Significant improvement needed."
    } else {
        "Limited ESG disclosure. Major improvements required across all areas."
    }
}

pub fn category_summary(category: Category, score: u32) -> String {
    if score >= 80 {
        format!("Strong {category} practices and comprehensive disclosure.")
    } else if score >= 60 {
        format!("Good {category} initiatives with some areas for improvement.")
    } else if score >= 40 {
        format!("Basic {category} considerations present but needs enhancement.")
    } else {
        format!("Limited {category} disclosure and practices identified.")
    }
}

/// `"Score: N/100 - <summary>"`
pub fn category_prose(category: Category, score: u32) -> String {
    format!("Score: {}/100 - {}", score, category_summary(category, score))
}

pub fn build_result(
    relevance: RelevanceScores,
    sentiment: EsgSentiment,
    negative_snippets: NegativeSnippets,
) -> AnalysisResult {
    let prose = PerCategory::from_fn(|c| category_prose(c, *relevance.get(c)));

    AnalysisResult {
        environmental: prose.environmental,
        social: prose.social,
        governance: prose.governance,
        score: overall_score(&relevance),
        summary: overall_summary(mean_relevance(&relevance)).to_string(),
        relevance,
        sentiment,
        negative_snippets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::{aggregate_esg, SentimentResult};

    fn scores(e: u32, s: u32, g: u32) -> RelevanceScores {
        PerCategory {
            environmental: e,
            social: s,
            governance: g,
        }
    }

    #[test]
    fn overall_score_rounds_mean() {
        assert_eq!(overall_score(&scores(10, 20, 31)), 20);
        assert_eq!(overall_score(&scores(0, 0, 2)), 1);
        assert_eq!(overall_score(&scores(100, 100, 100)), 100);
    }

    #[test]
    fn summary_tiers_have_inclusive_lower_bounds() {
        assert!(overall_summary(80.0).starts_with("Excellent"));
        assert!(overall_summary(79.99).starts_with("Good"));
        assert!(overall_summary(60.0).starts_with("Good"));
        assert!(overall_summary(40.0).starts_with("Moderate"));
        assert!(overall_summary(39.9).starts_with("Limited"));
    }

    #[test]
    fn summary_uses_unrounded_mean() {
        let s = scores(80, 80, 79);
        assert_eq!(overall_score(&s), 80);
        assert!(overall_summary(mean_relevance(&s)).starts_with("Good"));
    }

    #[test]
    fn category_prose_wording() {
        assert_eq!(
            category_prose(Category::Environmental, 85),
            "Score: 85/100 - Strong environmental practices and comprehensive disclosure."
        );
        assert_eq!(
            category_prose(Category::Social, 60),
            "Score: 60/100 - Good social initiatives with some areas for improvement."
        );
        assert_eq!(
            category_prose(Category::Governance, 40),
            "Score: 40/100 - Basic governance considerations present but needs enhancement."
        );
        assert_eq!(
            category_prose(Category::Governance, 0),
            "Score: 0/100 - Limited governance disclosure and practices identified."
        );
    }

    #[test]
    fn result_serializes_with_camel_case_snippets() {
        let n = SentimentResult::neutral();
        let r = build_result(
            scores(19, 35, 18),
            aggregate_esg(n, n, n),
            NegativeSnippets::default(),
        );
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["score"], 24);
        assert!(v["negativeSnippets"]["governance"].is_array());
        assert_eq!(v["sentiment"]["overall"]["label"], "neutral");
        assert!(v["summary"].as_str().unwrap().starts_with("Limited"));
    }
}
