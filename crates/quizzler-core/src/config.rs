//! Client configuration
//!
//! Defaults can be overridden from the environment:
//! - `QUIZZLER_API_URL`: server origin (default `http://localhost:8132`)
//! - `QUIZZLER_TIMEOUT_SECS`: request timeout in seconds (default 30)
//! - `QUIZZLER_SESSION_PATH`: session file location

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8132";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_URL_ENV: &str = "QUIZZLER_API_URL";
pub const TIMEOUT_ENV: &str = "QUIZZLER_TIMEOUT_SECS";
pub const SESSION_PATH_ENV: &str = "QUIZZLER_SESSION_PATH";

/// Settings for [`ApiClient`](crate::api::ApiClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin the `/api` prefix is appended to, without trailing slash
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("quizzler/{}", crate::VERSION),
        }
    }
}

impl ClientConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url);
            }
        }

        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::config(format!("{} must be a whole number of seconds, got {:?}", TIMEOUT_ENV, secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("Invalid API URL {:?}: {}", self.base_url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::config(format!(
                "Unsupported API URL scheme {:?} (expected http or https)",
                other
            ))),
        }
    }

    /// Full URL for an API endpoint such as `/decks/1`
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api{}", self.base_url, endpoint)
    }
}

/// Location of the persisted session file.
///
/// `QUIZZLER_SESSION_PATH` wins (with `~` expanded); otherwise the platform
/// data directory is used.
pub fn session_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(SESSION_PATH_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(shellexpand::tilde(&path).into_owned()));
        }
    }

    let dirs = directories::ProjectDirs::from("com", "quizzler", "Quizzler")
        .ok_or_else(|| Error::config("Could not determine project directories"))?;

    Ok(dirs.data_dir().join("session.json"))
}
