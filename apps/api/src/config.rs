use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_AI_MODEL_URL: &str = "http://localhost:8000";
const DEFAULT_AI_TIMEOUT_MS: u64 = 30_000;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub scoring: ScoringConfig,
    /// Directory that relative resume paths resolve against.
    pub upload_root: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

/// Connection settings for the external AI scoring service.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub base_url: String,
    pub api_key: String,
    /// Applies to analyze/recommend calls. The health probe has its own fixed bound.
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_ms = match std::env::var("AI_TIMEOUT_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("AI_TIMEOUT_MS must be a whole number of milliseconds")?,
            Err(_) => DEFAULT_AI_TIMEOUT_MS,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            scoring: ScoringConfig {
                base_url: std::env::var("AI_MODEL_URL")
                    .unwrap_or_else(|_| DEFAULT_AI_MODEL_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                api_key: std::env::var("AI_MODEL_API_KEY").unwrap_or_default(),
                timeout: Duration::from_millis(timeout_ms),
            },
            upload_root: std::env::var("UPLOAD_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
