//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod auth;
pub mod browse;
pub mod card;
pub mod config;
pub mod deck;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use quizzler_core::{ApiClient, ClientConfig, FileStorage, SessionStore};

use crate::output::OutputFormat;

/// Shared context for all commands
pub struct Context {
    pub client: ApiClient,
    pub session_path: PathBuf,
    pub session_path_from_flag: bool,
    pub api_url_from_flag: bool,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Context {
    /// Load the stored session and build the API client
    pub fn build(
        api_url: Option<String>,
        session_path: Option<PathBuf>,
        format: OutputFormat,
        quiet: bool,
    ) -> Result<Self> {
        let session_path_from_flag = session_path.is_some();
        let session_path = match session_path {
            Some(path) => path,
            None => quizzler_core::session_path()?,
        };
        log::debug!("Using session file {}", session_path.display());

        let storage = Arc::new(FileStorage::new(&session_path));
        let session = Arc::new(SessionStore::load(storage)?);

        let mut config = ClientConfig::from_env()?;
        let api_url_from_flag = api_url.is_some();
        if let Some(url) = api_url {
            config = config.with_base_url(url);
        }

        let client = ApiClient::new(config, session)?;

        Ok(Self {
            client,
            session_path,
            session_path_from_flag,
            api_url_from_flag,
            format,
            quiet,
        })
    }

    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }
}

/// Render an optional server timestamp in local time
pub fn format_timestamp(ts: Option<chrono::DateTime<chrono::Utc>>) -> String {
    ts.map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
