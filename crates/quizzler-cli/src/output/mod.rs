//! Output formatting module
//!
//! `--format json` prints the API models as the server returned them;
//! `--format table` maps each model to a per-command row type first.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Display;
use tabled::{Table, Tabled};

/// Value of the global `--format` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {}. Use 'table' or 'json'", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Print a list of items, as JSON or as a table of rows built by `to_row`
pub fn print_list<T, R>(items: &[T], to_row: impl Fn(&T) -> R, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No items found.");
            } else {
                let rows: Vec<R> = items.iter().map(to_row).collect();
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items)?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Print a single item in the specified format
pub fn print_single<T, R>(item: &T, to_row: impl Fn(&T) -> R, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            println!("{}", Table::new([to_row(item)]));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item)?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Confirmation after a mutation ("Created deck 3 (Kanji)"). Silenced by `-q`
/// so scripts using `--format json` only see the payload.
pub fn print_success(message: &str, quiet: bool) {
    if quiet {
        return;
    }
    println!("{}", message.green());
}

/// Top-level failure, red on stderr. `main` exits 1 right after.
pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}

/// Neutral status line such as "Not logged in"; silenced by `-q`.
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Shorten text for table cells, on char boundaries
pub fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let kept: String = single_line.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}
