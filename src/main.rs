//! ESG Analyzer Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the lexicon, sentiment backend and routes.

use esg_analyzer::config::AnalyzerConfig;
use esg_analyzer::lexicon::{self, Lexicon};
use esg_analyzer::metrics::Metrics;
use esg_analyzer::relevance::ENV_DEV_LOG;
use esg_analyzer::{api, EsgAnalyzer};
use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - ESG_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var(ENV_DEV_LOG).ok().is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("esg_analyzer=info,relevance=debug,analysis=info,warn")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    // Lexicon is built once and shared read-only by every request.
    let lex = lexicon::install_global(Lexicon::from_env()?);
    info!(
        environmental = lex.keywords(esg_analyzer::Category::Environmental).len(),
        indicators = lex.negative_indicators().len(),
        "lexicon ready"
    );

    let cfg = AnalyzerConfig::from_env()?;
    let analyzer = EsgAnalyzer::from_config(&cfg)?;
    info!(backend = analyzer.backend_name(), "sentiment backend selected");

    let metrics = Metrics::init()?;
    let router = api::router(api::AppState::new(analyzer)).merge(metrics.router());

    Ok(router.into())
}
