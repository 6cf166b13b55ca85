//! Bot configuration
//!
//! Secrets and endpoints are read once at startup and stay read-only for
//! the lifetime of the process.

use std::fmt;
use std::time::Duration;

use homework_client::{DEFAULT_API_URL, DEFAULT_ENDPOINT};

/// Secrets the bot cannot start without
pub const REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Default pause between two poll cycles
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Bot configuration
#[derive(Clone)]
pub struct Config {
    /// OAuth token for the homework status API
    pub practicum_token: String,

    /// Bot API token
    pub telegram_token: String,

    /// Chat that receives notifications
    pub telegram_chat_id: String,

    /// Homework status endpoint
    pub practicum_endpoint: String,

    /// Bot API base URL
    pub telegram_api_url: String,

    /// Pause between poll cycles, whatever their outcome
    pub retry_period: Duration,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - PRACTICUM_TOKEN (required)
    /// - TELEGRAM_TOKEN (required)
    /// - TELEGRAM_CHAT_ID (required)
    /// - PRACTICUM_ENDPOINT (optional, default: production endpoint)
    /// - TELEGRAM_API_URL (optional, default: https://api.telegram.org)
    /// - RETRY_PERIOD (optional, seconds, default: 600)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .into_iter()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            anyhow::bail!(
                "missing required environment variables: {}",
                missing.join(", ")
            );
        }

        let retry_period = get("RETRY_PERIOD")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RETRY_PERIOD);

        Ok(Self {
            practicum_token: get("PRACTICUM_TOKEN").unwrap_or_default(),
            telegram_token: get("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: get("TELEGRAM_CHAT_ID").unwrap_or_default(),
            practicum_endpoint: get("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            retry_period,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("practicum_endpoint", &self.practicum_endpoint),
            ("telegram_api_url", &self.telegram_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.retry_period.is_zero() {
            anyhow::bail!("retry_period must be greater than 0");
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("practicum_endpoint", &self.practicum_endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .finish()
    }
}
