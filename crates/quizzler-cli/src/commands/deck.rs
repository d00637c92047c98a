//! Deck commands
//!
//! Commands for managing the logged-in user's decks.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use quizzler_core::{Deck, DeckInput};

use crate::output::{print_list, print_single, print_success, truncate};
use super::{format_timestamp, Context};

#[derive(Subcommand)]
pub enum DeckAction {
    /// List your decks
    List,

    /// Show one deck
    Show {
        /// Deck ID
        id: i64,
    },

    /// List other users' public decks
    Public,

    /// Create a deck
    Create {
        /// Deck name
        name: String,

        /// Deck description
        #[arg(long, short, default_value = "")]
        description: String,

        /// Make the deck visible to everyone
        #[arg(long)]
        public: bool,
    },

    /// Update a deck; omitted fields keep their current value
    Update {
        /// Deck ID
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long, short)]
        description: Option<String>,

        /// Visibility (true/false)
        #[arg(long)]
        public: Option<bool>,
    },

    /// Delete a deck and its cards
    Delete {
        /// Deck ID
        id: i64,
    },
}

/// Deck row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct DeckRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Public")]
    pub public: String,
    #[tabled(rename = "Cards")]
    pub cards: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
}

impl From<&Deck> for DeckRow {
    fn from(deck: &Deck) -> Self {
        Self {
            id: deck.id,
            name: truncate(&deck.name, 40),
            description: truncate(&deck.description, 50),
            public: if deck.public { "yes" } else { "no" }.to_string(),
            cards: deck
                .card_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            updated: format_timestamp(deck.updated_at),
        }
    }
}

pub async fn execute(ctx: &Context, action: DeckAction) -> Result<()> {
    match action {
        DeckAction::List => list_decks(ctx).await,
        DeckAction::Show { id } => show_deck(ctx, id).await,
        DeckAction::Public => list_public_decks(ctx).await,
        DeckAction::Create {
            name,
            description,
            public,
        } => create_deck(ctx, DeckInput::new(name, description).public(public)).await,
        DeckAction::Update {
            id,
            name,
            description,
            public,
        } => update_deck(ctx, id, name, description, public).await,
        DeckAction::Delete { id } => delete_deck(ctx, id).await,
    }
}

async fn list_decks(ctx: &Context) -> Result<()> {
    let decks = ctx.client.get_decks().await?;
    print_list(&decks, |d| DeckRow::from(d), ctx.format)
}

async fn show_deck(ctx: &Context, id: i64) -> Result<()> {
    let deck = ctx.client.get_deck(id).await?;
    print_single(&deck, |d| DeckRow::from(d), ctx.format)
}

async fn list_public_decks(ctx: &Context) -> Result<()> {
    let decks = ctx.client.get_public_decks().await?;
    print_list(&decks, |d| DeckRow::from(d), ctx.format)
}

async fn create_deck(ctx: &Context, input: DeckInput) -> Result<()> {
    let deck = ctx.client.create_deck(&input).await?;
    print_success(&format!("Created deck {} ({})", deck.id, deck.name), ctx.quiet);
    if ctx.format == crate::output::OutputFormat::Json {
        print_single(&deck, |d| DeckRow::from(d), ctx.format)?;
    }
    Ok(())
}

async fn update_deck(
    ctx: &Context,
    id: i64,
    name: Option<String>,
    description: Option<String>,
    public: Option<bool>,
) -> Result<()> {
    let current = ctx.client.get_deck(id).await?;
    let input = merge_update(&current, name, description, public);
    let deck = ctx.client.update_deck(id, &input).await?;
    print_success(&format!("Updated deck {} ({})", deck.id, deck.name), ctx.quiet);
    if ctx.format == crate::output::OutputFormat::Json {
        print_single(&deck, |d| DeckRow::from(d), ctx.format)?;
    }
    Ok(())
}

async fn delete_deck(ctx: &Context, id: i64) -> Result<()> {
    ctx.client.delete_deck(id).await?;
    print_success(&format!("Deleted deck {}", id), ctx.quiet);
    Ok(())
}

/// The update endpoint replaces all fields, so start from the stored deck
fn merge_update(
    current: &Deck,
    name: Option<String>,
    description: Option<String>,
    public: Option<bool>,
) -> DeckInput {
    DeckInput {
        name: name.unwrap_or_else(|| current.name.clone()),
        description: description.unwrap_or_else(|| current.description.clone()),
        public: public.unwrap_or(current.public),
    }
}
