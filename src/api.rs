use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::analyze::EsgAnalyzer;
use crate::engine::AnalysisResult;
use crate::error::AnalysisError;
use crate::fetch::PageFetcher;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<EsgAnalyzer>,
    /// Page-to-text collaborator; `url` requests are rejected while unset.
    pub fetcher: Option<Arc<dyn PageFetcher>>,
}

impl AppState {
    pub fn new(analyzer: EsgAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            fetcher: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        let (status, message) = match &e {
            AnalysisError::Fetch(fe) => (
                StatusCode::BAD_GATEWAY,
                format!("Failed to fetch the URL: {fe}"),
            ),
            AnalysisError::BackendUninitialized(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to analyze the content".to_string(),
            ),
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let result = match (non_blank(body.text), non_blank(body.url)) {
        (Some(text), _) => state.analyzer.analyze(&text).await,
        (None, Some(url)) => {
            let fetcher = state.fetcher.as_deref().ok_or_else(|| {
                ApiError::bad_request("URL fetching is not configured; send text instead")
            })?;
            state.analyzer.analyze_url(fetcher, url.trim()).await
        }
        (None, None) => return Err(ApiError::bad_request("URL or text is required")),
    };

    result.map(Json).map_err(|e| {
        error!(error = %e, "analysis request failed");
        ApiError::from(e)
    })
}
