// src/sentiment/model.rs
//! Pluggable model-backed sentiment: provider abstraction + HTTP inference client.
//!
//! Training, vocabularies and model persistence live with whatever serves the model;
//! this side only sends preprocessed text and reads back a raw score in [0,1].

use super::{lexical::tokenize, SentimentBackend, SentimentResult};
use crate::error::AnalysisError;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Sequence length the model expects; longer inputs are cut.
pub const MAX_MODEL_TOKENS: usize = 100;

/// Lower-case, strip non-word chars, keep the first 100 tokens.
pub fn preprocess(text: &str) -> String {
    tokenize(text)
        .into_iter()
        .take(MAX_MODEL_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Low-level model: returns a raw sentiment score for preprocessed text.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    async fn predict(&self, text: &str) -> anyhow::Result<f64>;
    fn name(&self) -> &'static str;
}

/// Backend that delegates scoring to an installed `SentimentModel`.
///
/// Starts empty; `analyze` fails with `BackendUninitialized` until `install` ran.
#[derive(Default)]
pub struct ModelBackend {
    model: OnceCell<Arc<dyn SentimentModel>>,
}

impl ModelBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: Arc<dyn SentimentModel>) -> Self {
        let backend = Self::new();
        let _ = backend.model.set(model);
        backend
    }

    /// Install the model once. A second install is rejected.
    pub fn install(&self, model: Arc<dyn SentimentModel>) -> Result<(), AnalysisError> {
        self.model
            .set(model)
            .map_err(|_| AnalysisError::Config("sentiment model already installed".into()))
    }

    pub fn is_ready(&self) -> bool {
        self.model.get().is_some()
    }
}

#[async_trait]
impl SentimentBackend for ModelBackend {
    async fn analyze(&self, text: &str) -> Result<SentimentResult, AnalysisError> {
        let model = self
            .model
            .get()
            .ok_or(AnalysisError::BackendUninitialized("model"))?;

        let input = preprocess(text);
        if input.is_empty() {
            return Ok(SentimentResult::neutral());
        }

        let raw = model.predict(&input).await.map_err(|e| {
            warn!(error = %e, model = model.name(), "sentiment model prediction failed");
            AnalysisError::Backend(e.to_string())
        })?;
        Ok(SentimentResult::from_score(raw))
    }

    fn name(&self) -> &'static str {
        "model"
    }
}

/// Remote model behind a small JSON endpoint:
/// `POST {"text": "..."}` → `{"score": 0.73}`.
pub struct HttpSentimentModel {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSentimentModel {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("esg-analyzer/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[derive(Serialize)]
struct PredictReq<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct PredictResp {
    score: f64,
}

#[async_trait]
impl SentimentModel for HttpSentimentModel {
    async fn predict(&self, text: &str) -> anyhow::Result<f64> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&PredictReq { text })
            .send()
            .await?
            .error_for_status()?;
        let body: PredictResp = resp.json().await?;
        Ok(body.score)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
