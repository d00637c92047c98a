//! Card endpoints

use super::{ApiClient, ApiRequest};
use crate::error::Result;
use crate::models::{Card, CardInput, ImportCardsRequest, ImportResult};

impl ApiClient {
    /// `GET /decks/:id/cards`
    pub async fn get_cards(&self, deck_id: i64) -> Result<Vec<Card>> {
        self.request_json(ApiRequest::get(format!("/decks/{}/cards", deck_id)))
            .await
    }

    /// `GET /cards/:id`
    pub async fn get_card(&self, id: i64) -> Result<Card> {
        self.request_json(ApiRequest::get(format!("/cards/{}", id))).await
    }

    /// `POST /decks/:id/cards`
    pub async fn create_card(&self, deck_id: i64, input: &CardInput) -> Result<Card> {
        let req = ApiRequest::post(format!("/decks/{}/cards", deck_id)).json(input)?;
        self.request_json(req).await
    }

    /// `PUT /cards/:id`
    pub async fn update_card(&self, id: i64, input: &CardInput) -> Result<Card> {
        self.request_json(ApiRequest::put(format!("/cards/{}", id)).json(input)?)
            .await
    }

    /// `DELETE /cards/:id`
    pub async fn delete_card(&self, id: i64) -> Result<()> {
        self.request_empty(ApiRequest::delete(format!("/cards/{}", id)))
            .await
    }

    /// `POST /decks/:id/cards/import`
    pub async fn import_cards(&self, deck_id: i64, cards: &[CardInput]) -> Result<ImportResult> {
        let req = ApiRequest::post(format!("/decks/{}/cards/import", deck_id))
            .json(&ImportCardsRequest { cards })?;
        self.request_json(req).await
    }
}
