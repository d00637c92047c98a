//! # quizzler-core
//!
//! Client library for the Quizzler flashcard API - shared by front ends.
//!
//! This crate provides:
//! - Session state with durable storage (`session` module)
//! - The API client and endpoint helpers (`api` module)
//! - Data models (`models` module)
//! - Client configuration (`config` module)
//! - Unified error handling (`error` module)
//!
//! ```no_run
//! use std::sync::Arc;
//! use quizzler_core::{ApiClient, ClientConfig, FileStorage, SessionStore};
//!
//! # async fn run() -> quizzler_core::Result<()> {
//! let storage = Arc::new(FileStorage::open_default()?);
//! let session = Arc::new(SessionStore::load(storage)?);
//! let client = ApiClient::new(ClientConfig::from_env()?, session)?;
//!
//! client.login("a@b.com", "secret").await?;
//! for deck in client.get_decks().await? {
//!     println!("{}", deck.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

// Re-exports for convenience
pub use api::{ApiClient, ApiRequest};
pub use config::{session_path, ClientConfig};
pub use error::{Error, Result};
pub use models::{AuthResponse, Card, CardInput, Deck, DeckInput, ImportResult, User};
pub use session::{
    FileStorage, MemoryStorage, Observable, Session, SessionStorage, SessionStore, Subscription,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
