use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_API_BASE;

/// Which deployment shape the binary runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Long-running server: retries, theme override, serves the index page.
    Standalone,
    /// Single-function deployment: one attempt, API route only.
    Serverless,
}

impl FromStr for ProfileKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standalone" => Ok(ProfileKind::Standalone),
            "serverless" => Ok(ProfileKind::Serverless),
            other => bail!("FORTUNE_PROFILE must be 'standalone' or 'serverless', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Only malformed values are fatal; a missing API key is reported per request.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_url: String,
    pub profile: ProfileKind,
    pub max_attempts: Option<u32>,
    pub llm_timeout: Duration,
    pub static_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_attempts = match optional_env("MAX_ATTEMPTS") {
            Some(raw) => {
                let n = raw
                    .parse::<u32>()
                    .context("MAX_ATTEMPTS must be a positive integer")?;
                if n == 0 {
                    bail!("MAX_ATTEMPTS must be at least 1");
                }
                Some(n)
            }
            None => None,
        };

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            anthropic_api_url: optional_env("ANTHROPIC_API_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            profile: optional_env("FORTUNE_PROFILE")
                .map(|p| p.parse())
                .transpose()?
                .unwrap_or(ProfileKind::Standalone),
            max_attempts,
            llm_timeout: Duration::from_secs(
                optional_env("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|| "10".to_string())
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            static_dir: optional_env("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            port: optional_env("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
