//! Card commands
//!
//! Commands for managing cards inside the user's decks, including bulk import.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use quizzler_core::{Card, CardInput};

use crate::output::{print_list, print_single, print_success, truncate, OutputFormat};
use super::{format_timestamp, Context};

#[derive(Subcommand)]
pub enum CardAction {
    /// List cards in a deck
    List {
        /// Deck ID
        deck_id: i64,
    },

    /// Show one card
    Show {
        /// Card ID
        id: i64,
    },

    /// Add a card to a deck
    Create {
        /// Deck ID
        deck_id: i64,

        /// Question side
        front: String,

        /// Answer side
        back: String,
    },

    /// Update a card; omitted sides keep their current text
    Update {
        /// Card ID
        id: i64,

        /// New question side
        #[arg(long)]
        front: Option<String>,

        /// New answer side
        #[arg(long)]
        back: Option<String>,
    },

    /// Delete a card
    Delete {
        /// Card ID
        id: i64,
    },

    /// Import cards from a file (JSON array or front<TAB>back lines;
    /// lines starting with `#` and holding no tab are comments)
    Import {
        /// Deck ID
        deck_id: i64,

        /// File to read; `-` reads stdin
        file: PathBuf,
    },
}

/// Card row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct CardRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Deck")]
    pub deck_id: i64,
    #[tabled(rename = "Front")]
    pub front: String,
    #[tabled(rename = "Back")]
    pub back: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
}

impl From<&Card> for CardRow {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            deck_id: card.deck_id,
            front: truncate(&card.front, 40),
            back: truncate(&card.back, 40),
            updated: format_timestamp(card.updated_at),
        }
    }
}

pub async fn execute(ctx: &Context, action: CardAction) -> Result<()> {
    match action {
        CardAction::List { deck_id } => {
            let cards = ctx.client.get_cards(deck_id).await?;
            print_list(&cards, |c| CardRow::from(c), ctx.format)
        }
        CardAction::Show { id } => {
            let card = ctx.client.get_card(id).await?;
            print_single(&card, |c| CardRow::from(c), ctx.format)
        }
        CardAction::Create {
            deck_id,
            front,
            back,
        } => {
            let card = ctx
                .client
                .create_card(deck_id, &CardInput::new(front, back))
                .await?;
            print_success(&format!("Created card {} in deck {}", card.id, deck_id), ctx.quiet);
            if ctx.format == OutputFormat::Json {
                print_single(&card, |c| CardRow::from(c), ctx.format)?;
            }
            Ok(())
        }
        CardAction::Update { id, front, back } => update_card(ctx, id, front, back).await,
        CardAction::Delete { id } => {
            ctx.client.delete_card(id).await?;
            print_success(&format!("Deleted card {}", id), ctx.quiet);
            Ok(())
        }
        CardAction::Import { deck_id, file } => import_cards(ctx, deck_id, &file).await,
    }
}

async fn update_card(
    ctx: &Context,
    id: i64,
    front: Option<String>,
    back: Option<String>,
) -> Result<()> {
    if front.is_none() && back.is_none() {
        bail!("Nothing to update: pass --front and/or --back");
    }

    let input = match (front, back) {
        (Some(front), Some(back)) => CardInput::new(front, back),
        (front, back) => {
            let current = ctx.client.get_card(id).await?;
            CardInput::new(
                front.unwrap_or(current.front),
                back.unwrap_or(current.back),
            )
        }
    };

    let card = ctx.client.update_card(id, &input).await?;
    print_success(&format!("Updated card {}", card.id), ctx.quiet);
    if ctx.format == OutputFormat::Json {
        print_single(&card, |c| CardRow::from(c), ctx.format)?;
    }
    Ok(())
}

async fn import_cards(ctx: &Context, deck_id: i64, file: &Path) -> Result<()> {
    let content = read_source(file)?;
    let cards = parse_import(&content)
        .with_context(|| format!("Could not parse {}", file.display()))?;

    if cards.is_empty() {
        bail!("No cards found in {}", file.display());
    }
    log::info!("Importing {} cards into deck {}", cards.len(), deck_id);

    let result = ctx.client.import_cards(deck_id, &cards).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => print_success(
            &format!("Imported {} cards into deck {}", result.imported, deck_id),
            ctx.quiet,
        ),
    }
    Ok(())
}

fn read_source(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut content = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut content)?;
        return Ok(content);
    }
    std::fs::read_to_string(file).with_context(|| format!("Could not read {}", file.display()))
}

/// Parse an import file.
///
/// A leading `[` means a JSON array of `{"front", "back"}` objects. Anything
/// else is one card per line as `front<TAB>back`. Blank lines are skipped, as
/// are comment lines: a leading `#` with no tab. A line with a tab is always a
/// card, so `#include<TAB>...` imports.
pub fn parse_import(content: &str) -> Result<Vec<CardInput>> {
    let trimmed = content.trim_start_matches('\u{feff}').trim();
    if trimmed.starts_with('[') {
        let cards: Vec<CardInput> = serde_json::from_str(trimmed)?;
        return Ok(cards);
    }

    let mut cards = Vec::new();
    for (index, line) in trimmed.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || (line.starts_with('#') && !line.contains('\t')) {
            continue;
        }
        match line.split_once('\t') {
            Some((front, back)) if !front.trim().is_empty() => {
                cards.push(CardInput::new(front.trim(), back.trim()));
            }
            _ => bail!("line {}: expected front<TAB>back", index + 1),
        }
    }
    Ok(cards)
}
