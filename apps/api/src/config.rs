use std::str::FromStr;

use anyhow::{Context, Result};

const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_VALIDATION_MODEL: &str = "claude-3-haiku-20240307";
const DEFAULT_FEEDBACK_MODEL: &str = "claude-3-sonnet-20240229";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    /// Cheap classification tier used to reject non-CV uploads.
    pub validation_model: String,
    /// Generation tier that writes the structured feedback.
    pub feedback_model: String,
    pub llm_timeout_secs: u64,
    /// Transport cap on request bodies. Kept above the 5 MiB document limit so
    /// oversize uploads still reach the handler and get a readable error.
    pub max_body_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: env_or_string("ANTHROPIC_API_URL", DEFAULT_ANTHROPIC_API_URL),
            validation_model: env_or_string("VALIDATION_MODEL", DEFAULT_VALIDATION_MODEL),
            feedback_model: env_or_string("FEEDBACK_MODEL", DEFAULT_FEEDBACK_MODEL),
            llm_timeout_secs: env_or_parse("LLM_TIMEOUT_SECS", 120)?,
            max_body_bytes: env_or_parse("MAX_BODY_BYTES", 10 * 1024 * 1024)?,
            port: env_or_parse("PORT", 8080)?,
            rust_log: env_or_string("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}
