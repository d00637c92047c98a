//! Config commands
//!
//! Shows the effective client configuration and where each value came from.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use quizzler_core::config::{API_URL_ENV, SESSION_PATH_ENV, TIMEOUT_ENV};

use crate::output::print_list;
use super::Context;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
}

/// Config row for table display
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

pub fn execute(ctx: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let rows = config_rows(ctx);
    print_list(&rows, ConfigRow::clone, ctx.format)
}

fn config_rows(ctx: &Context) -> Vec<ConfigRow> {
    let config = ctx.client.config();
    let session = ctx.session().session();

    vec![
        ConfigRow {
            key: "api_url".to_string(),
            value: config.base_url.clone(),
            source: source(ctx.api_url_from_flag, API_URL_ENV).to_string(),
        },
        ConfigRow {
            key: "timeout".to_string(),
            value: format!("{}s", config.timeout.as_secs()),
            source: source(false, TIMEOUT_ENV).to_string(),
        },
        ConfigRow {
            key: "session_path".to_string(),
            value: ctx.session_path.display().to_string(),
            source: source(ctx.session_path_from_flag, SESSION_PATH_ENV).to_string(),
        },
        ConfigRow {
            key: "authenticated".to_string(),
            value: session.is_authenticated.to_string(),
            source: "session".to_string(),
        },
        ConfigRow {
            key: "user".to_string(),
            value: session
                .user
                .map(|u| u.email)
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "-".to_string()),
            source: "session".to_string(),
        },
    ]
}

fn source(from_flag: bool, env_var: &str) -> &'static str {
    if from_flag {
        "flag"
    } else if std::env::var(env_var).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        "env"
    } else {
        "default"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_prefers_flag() {
        assert_eq!(source(true, "QUIZZLER_TEST_UNSET_VAR"), "flag");
        assert_eq!(source(false, "QUIZZLER_TEST_UNSET_VAR"), "default");
    }
}
