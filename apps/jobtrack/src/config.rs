use std::time::Duration;

use anyhow::{bail, Context, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Which `MatcherService` backend answers analyze requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatcherBackend {
    /// POST /analyze/ on the configured backend.
    #[default]
    Remote,
    /// In-process keyword overlap, no network.
    Keyword,
}

/// Client configuration loaded from environment variables.
/// Every variable is optional; invalid values fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub matcher: MatcherBackend,
    pub http_timeout: Option<Duration>,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            matcher: MatcherBackend::Remote,
            http_timeout: None,
            rust_log: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("JOBTRACK_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if api_url.is_empty() {
            bail!("JOBTRACK_API_URL must not be empty");
        }

        let matcher = match lookup("JOBTRACK_MATCHER").as_deref().map(str::trim) {
            None | Some("") | Some("remote") => MatcherBackend::Remote,
            Some("keyword") => MatcherBackend::Keyword,
            Some(other) => bail!("JOBTRACK_MATCHER must be 'remote' or 'keyword', got '{other}'"),
        };

        let http_timeout = lookup("JOBTRACK_HTTP_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .context("JOBTRACK_HTTP_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        Ok(Config {
            api_url,
            matcher,
            http_timeout,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "warn".to_string()),
        })
    }
}
