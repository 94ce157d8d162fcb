use anyhow::{Context, Result};

use crate::catalogue::height::DEFAULT_HEIGHT_TOLERANCE_CM;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub catalogue_path: String,
    pub port: u16,
    pub rust_log: String,
    /// Tolerance applied to absolute height filters, in centimeters.
    pub height_tolerance_cm: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            catalogue_path: std::env::var("CATALOGUE_PATH")
                .unwrap_or_else(|_| "elysium_kb/models_final.jsonl".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            height_tolerance_cm: std::env::var("HEIGHT_TOLERANCE_CM")
                .unwrap_or_else(|_| DEFAULT_HEIGHT_TOLERANCE_CM.to_string())
                .parse::<i64>()
                .context("HEIGHT_TOLERANCE_CM must be an integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
