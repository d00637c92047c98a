//! Unauthenticated public deck browsing
//!
//! These calls bypass [`ApiClient::request`]: no Authorization header, no
//! session side effects, and a fixed message for any failure status.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::ApiClient;
use crate::error::{Error, Result};
use crate::models::{Card, Deck};

pub const PUBLIC_DECKS_FAILED: &str = "Failed to fetch public decks";
pub const PUBLIC_DECK_NOT_FOUND: &str = "Deck not found";
pub const PUBLIC_CARDS_FAILED: &str = "Failed to fetch cards";

impl ApiClient {
    /// `GET /public-decks`
    pub async fn browse_public_decks(&self) -> Result<Vec<Deck>> {
        self.get_public("/public-decks", PUBLIC_DECKS_FAILED).await
    }

    /// `GET /public-decks/:id`
    pub async fn get_public_deck(&self, id: i64) -> Result<Deck> {
        self.get_public(&format!("/public-decks/{}", id), PUBLIC_DECK_NOT_FOUND)
            .await
    }

    /// `GET /public-decks/:id/cards`
    pub async fn get_public_deck_cards(&self, id: i64) -> Result<Vec<Card>> {
        self.get_public(&format!("/public-decks/{}/cards", id), PUBLIC_CARDS_FAILED)
            .await
    }

    async fn get_public<T: DeserializeOwned>(&self, endpoint: &str, failure: &str) -> Result<T> {
        log::debug!("[api] GET {} (public)", endpoint);

        let response = self.http.get(self.config.api_url(endpoint)).send().await?;
        let status: StatusCode = response.status();

        if !status.is_success() {
            log::debug!("[api] GET {} failed with {}", endpoint, status);
            return Err(Error::not_found(failure));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::parse(format!("GET {} returned an unexpected body: {}", endpoint, e)))
    }
}
