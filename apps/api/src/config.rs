use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

pub const DEFAULT_DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Application configuration loaded from `.env` and the process environment.
///
/// Only malformed values abort startup. A missing `DEEPSEEK_API_KEY` is
/// reported by [`Config::report_environment`] and leaves the advisor
/// unavailable.
#[derive(Debug, Clone)]
pub struct Config {
    pub deepseek_api_key: Option<String>,
    pub deepseek_base_url: String,
    pub demo_mode: bool,
    pub max_upload_bytes: usize,
    /// Idle time after which a session is discarded.
    pub session_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Values in .env win over the inherited environment.
        dotenvy::dotenv_override().ok();

        Ok(Config {
            deepseek_api_key: optional_env("DEEPSEEK_API_KEY"),
            deepseek_base_url: optional_env("DEEPSEEK_BASE_URL")
                .unwrap_or_else(|| DEFAULT_DEEPSEEK_BASE_URL.to_string()),
            demo_mode: optional_env("DEMO_MODE")
                .map(|v| parse_flag(&v))
                .transpose()?
                .unwrap_or(false),
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            session_ttl: optional_env("SESSION_TTL_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("SESSION_TTL_SECS must be a number of seconds")?
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(DEFAULT_SESSION_TTL_SECS)),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Logs credential status and common `.env` mistakes. Call after the
    /// tracing subscriber is installed.
    pub fn report_environment(&self) {
        if Path::new(".env.txt").exists() {
            warn!("Found .env.txt in the working directory; rename it to .env");
        }
        match &self.deepseek_api_key {
            Some(_) => info!("DEEPSEEK_API_KEY loaded"),
            None => warn!(
                "DEEPSEEK_API_KEY is not set (checked .env and the process environment); \
                 AI diagnosis and generation will return degraded results"
            ),
        }
        if self.demo_mode {
            info!("Demo mode enabled: demo results are served while the AI backend is unavailable");
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("DEMO_MODE must be a boolean, got '{other}'"),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            deepseek_api_key: None,
            deepseek_base_url: DEFAULT_DEEPSEEK_BASE_URL.to_string(),
            demo_mode: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            port: 0,
            rust_log: "info".to_string(),
        }
    }
}
