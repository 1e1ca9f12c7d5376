// src/fetch.rs
//! Page-to-text collaborator contract. Fetching and HTML stripping live outside
//! this crate; the API only needs something that turns a URL into plain text.

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("could not extract text: {0}")]
    Parse(String),
}

/// Given a URL, return the extracted body text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
    fn name(&self) -> &'static str;
}
