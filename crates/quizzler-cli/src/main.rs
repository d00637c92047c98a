//! Quizzler CLI - flashcard decks from the terminal
//!
//! A command-line interface for logging in, managing decks and cards,
//! and browsing public decks on a Quizzler server.

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quizzler")]
#[command(author, version, about = "Flashcard deck CLI for Quizzler", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Server origin (or set QUIZZLER_API_URL env var)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (or set QUIZZLER_SESSION_PATH env var)
    #[arg(long, global = true)]
    session: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        /// Account email
        email: String,

        /// Password (prompted on stdin when omitted)
        #[arg(long, env = "QUIZZLER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and store the session
    Register {
        /// Account email
        email: String,

        /// Password (prompted on stdin when omitted)
        #[arg(long, env = "QUIZZLER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Manage your decks
    Deck {
        #[command(subcommand)]
        action: commands::deck::DeckAction,
    },

    /// Manage cards in your decks
    Card {
        #[command(subcommand)]
        action: commands::card::CardAction,
    },

    /// Browse public decks (no login needed)
    Browse {
        #[command(subcommand)]
        action: commands::browse::BrowseAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = commands::Context::build(cli.api_url, cli.session, cli.format, cli.quiet)?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, password).await,
        Commands::Register { email, password } => {
            commands::auth::register(&ctx, &email, password).await
        }
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Deck { action } => commands::deck::execute(&ctx, action).await,
        Commands::Card { action } => commands::card::execute(&ctx, action).await,
        Commands::Browse { action } => commands::browse::execute(&ctx, action).await,
        Commands::Config { action } => commands::config::execute(&ctx, action),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
