// src/config/analyzer.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

pub const DEFAULT_ANALYZER_CONFIG_PATH: &str = "config/analyzer.json";
pub const ENV_ANALYZER_CONFIG_PATH: &str = "ESG_ANALYZER_CONFIG_PATH";
pub const ENV_SENTIMENT_BACKEND: &str = "ESG_SENTIMENT_BACKEND";

fn default_model_timeout_ms() -> u64 {
    10_000
}

/// Which sentiment implementation serves `analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Lexicon,
    Model,
}

impl BackendKind {
    /// Case-insensitive parse of "lexicon" | "model".
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lexicon" => Ok(BackendKind::Lexicon),
            "model" => Ok(BackendKind::Model),
            other => anyhow::bail!("Unsupported sentiment backend: {other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub sentiment_backend: BackendKind,
    /// Inference endpoint for the model backend (`POST {"text"}` → `{"score"}`).
    #[serde(default)]
    pub model_endpoint: Option<String>,
    #[serde(default = "default_model_timeout_ms")]
    pub model_timeout_ms: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sentiment_backend: BackendKind::Lexicon,
            model_endpoint: None,
            model_timeout_ms: default_model_timeout_ms(),
        }
    }
}

impl AnalyzerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: AnalyzerConfig = serde_json::from_str(&data)?;

        // Sanitize
        if cfg.model_timeout_ms == 0 {
            cfg.model_timeout_ms = default_model_timeout_ms();
        }
        cfg.model_endpoint = cfg
            .model_endpoint
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(cfg)
    }

    /// Resolve from `ESG_ANALYZER_CONFIG_PATH` (or `config/analyzer.json`), then apply
    /// `ESG_SENTIMENT_BACKEND`. A missing default file yields defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let explicit = env::var(ENV_ANALYZER_CONFIG_PATH).ok().map(PathBuf::from);
        let path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ANALYZER_CONFIG_PATH));

        let mut cfg = if explicit.is_some() || path.exists() {
            Self::load_from_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load analyzer config at {}: {}", path.display(), e)
            })?
        } else {
            Self::default()
        };

        if let Ok(raw) = env::var(ENV_SENTIMENT_BACKEND) {
            cfg.sentiment_backend = BackendKind::parse(&raw)?;
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn tmp_file(name: &str, body: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        dir.push(format!("esg_cfg_test_{}", nanos));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        write!(f, "{body}").unwrap();
        path
    }

    #[test]
    fn parses_and_sanitizes() {
        let path = tmp_file(
            "analyzer.json",
            r#"{"sentiment_backend":"model","model_endpoint":"  ","model_timeout_ms":0}"#,
        );
        let cfg = AnalyzerConfig::load_from_file(&path).unwrap();
        assert_eq!(cfg.sentiment_backend, BackendKind::Model);
        assert_eq!(cfg.model_endpoint, None);
        assert_eq!(cfg.model_timeout_ms, 10_000);
    }

    #[test]
    fn backend_names_are_case_insensitive() {
        assert_eq!(BackendKind::parse(" Model ").unwrap(), BackendKind::Model);
        assert!(BackendKind::parse("tensorflow").is_err());
    }

    #[test]
    #[serial]
    fn env_overrides_backend() {
        let path = tmp_file("analyzer.json", r#"{"sentiment_backend":"lexicon"}"#);
        env::set_var(ENV_ANALYZER_CONFIG_PATH, &path);
        env::set_var(ENV_SENTIMENT_BACKEND, "model");
        let cfg = AnalyzerConfig::from_env();
        env::remove_var(ENV_ANALYZER_CONFIG_PATH);
        env::remove_var(ENV_SENTIMENT_BACKEND);
        assert_eq!(cfg.unwrap().sentiment_backend, BackendKind::Model);
    }

    #[test]
    #[serial]
    fn explicit_missing_path_is_an_error() {
        env::set_var(ENV_ANALYZER_CONFIG_PATH, "/definitely/not/here.json");
        let cfg = AnalyzerConfig::from_env();
        env::remove_var(ENV_ANALYZER_CONFIG_PATH);
        assert!(cfg.is_err());
    }
}
