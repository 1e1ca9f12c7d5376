// src/lib.rs
// Public library surface for integration tests (and reuse outside the HTTP service).

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod lexicon;
pub mod metrics;
pub mod relevance;
pub mod sentiment;
pub mod snippets;

// Pipeline entry (relevance, extraction, snippets, sentiment, aggregation)
pub mod analyze;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{build_backend, EsgAnalyzer};
pub use crate::api::{router, AppState};
pub use crate::engine::AnalysisResult;
pub use crate::error::AnalysisError;
pub use crate::lexicon::Category;
pub use crate::sentiment::{SentimentBackend, SentimentLabel, SentimentResult};
