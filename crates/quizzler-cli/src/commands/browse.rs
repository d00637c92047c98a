//! Browse commands
//!
//! Read-only access to public decks. Works without logging in.

use anyhow::Result;
use clap::Subcommand;

use crate::output::{print_list, print_single};
use super::card::CardRow;
use super::deck::DeckRow;
use super::Context;

#[derive(Subcommand)]
pub enum BrowseAction {
    /// List all public decks
    List,

    /// Show one public deck
    Show {
        /// Deck ID
        id: i64,
    },

    /// List the cards of a public deck
    Cards {
        /// Deck ID
        id: i64,
    },
}

pub async fn execute(ctx: &Context, action: BrowseAction) -> Result<()> {
    match action {
        BrowseAction::List => {
            let decks = ctx.client.browse_public_decks().await?;
            print_list(&decks, |d| DeckRow::from(d), ctx.format)
        }
        BrowseAction::Show { id } => {
            let deck = ctx.client.get_public_deck(id).await?;
            print_single(&deck, |d| DeckRow::from(d), ctx.format)
        }
        BrowseAction::Cards { id } => {
            let cards = ctx.client.get_public_deck_cards(id).await?;
            print_list(&cards, |c| CardRow::from(c), ctx.format)
        }
    }
}
