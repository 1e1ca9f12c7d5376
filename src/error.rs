// src/error.rs
//! Error kinds surfaced by the analysis pipeline.

use crate::fetch::FetchError;

/// Errors returned by `EsgAnalyzer` and sentiment backends.
///
/// Scoring itself never fails: "nothing matched" degrades to score 0 / neutral.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The page-to-text collaborator failed; passed through unchanged.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A pluggable sentiment backend was used before it was set up.
    #[error("sentiment backend `{0}` is not initialized")]
    BackendUninitialized(&'static str),

    /// A backend reported a fault while scoring.
    #[error("sentiment backend error: {0}")]
    Backend(String),

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic boundary error; internal details are logged, not returned.
    #[error("analysis failed")]
    Failed,
}

impl AnalysisError {
    /// Collapse internal faults into `Failed` at the pipeline boundary.
    /// Fetch and initialization errors are kept so callers can react to them.
    pub fn at_boundary(self) -> Self {
        match self {
            e @ (AnalysisError::Fetch(_) | AnalysisError::BackendUninitialized(_)) => e,
            AnalysisError::Backend(_) | AnalysisError::Config(_) | AnalysisError::Failed => {
                AnalysisError::Failed
            }
        }
    }
}
