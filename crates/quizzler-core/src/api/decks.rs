//! Deck endpoints

use super::{ApiClient, ApiRequest};
use crate::error::Result;
use crate::models::{Deck, DeckInput};

impl ApiClient {
    /// `GET /decks`: decks owned by the current user
    pub async fn get_decks(&self) -> Result<Vec<Deck>> {
        self.request_json(ApiRequest::get("/decks")).await
    }

    /// `GET /decks/:id`
    pub async fn get_deck(&self, id: i64) -> Result<Deck> {
        self.request_json(ApiRequest::get(format!("/decks/{}", id))).await
    }

    /// `GET /decks/public`: other users' public decks, authenticated view
    pub async fn get_public_decks(&self) -> Result<Vec<Deck>> {
        self.request_json(ApiRequest::get("/decks/public")).await
    }

    /// `POST /decks`
    pub async fn create_deck(&self, input: &DeckInput) -> Result<Deck> {
        self.request_json(ApiRequest::post("/decks").json(input)?).await
    }

    /// `PUT /decks/:id`
    pub async fn update_deck(&self, id: i64, input: &DeckInput) -> Result<Deck> {
        self.request_json(ApiRequest::put(format!("/decks/{}", id)).json(input)?)
            .await
    }

    /// `DELETE /decks/:id`
    pub async fn delete_deck(&self, id: i64) -> Result<()> {
        self.request_empty(ApiRequest::delete(format!("/decks/{}", id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::models::DeckInput;
    use httpmock::prelude::*;
    use serde_json::json;

    fn deck_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": 1,
            "name": name,
            "description": "",
            "public": false,
            "card_count": 0,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_get_decks() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/decks").header("authorization", "Bearer abc");
                then.status(200)
                    .json_body(json!([deck_json(1, "Spanish"), deck_json(2, "Kanji")]));
            })
            .await;

        let (session, _) = session_with_token("abc");
        let client = client_for(&server.base_url(), session);

        let decks = client.get_decks().await.unwrap();

        assert_eq!(decks.len(), 2);
        assert_eq!(decks[1].name, "Kanji");
    }

    #[tokio::test]
    async fn test_get_deck_and_public_listing_paths() {
        let server = MockServer::start_async().await;
        let one = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/decks/7");
                then.status(200).json_body(deck_json(7, "Seven"));
            })
            .await;
        let public = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/decks/public");
                then.status(200).json_body(json!([deck_json(3, "Shared")]));
            })
            .await;

        let (session, _) = session_with_token("abc");
        let client = client_for(&server.base_url(), session);

        assert_eq!(client.get_deck(7).await.unwrap().name, "Seven");
        assert_eq!(client.get_public_decks().await.unwrap()[0].id, 3);
        one.assert_async().await;
        public.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_and_update_deck_bodies() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/decks")
                    .json_body(json!({"name": "Spanish", "description": "Verbs", "public": false}));
                then.status(201).json_body(deck_json(5, "Spanish"));
            })
            .await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/decks/5")
                    .json_body(json!({"name": "Spanish", "description": "Verbs", "public": true}));
                then.status(200).json_body(deck_json(5, "Spanish"));
            })
            .await;

        let (session, _) = session_with_token("abc");
        let client = client_for(&server.base_url(), session);
        let input = DeckInput::new("Spanish", "Verbs");

        let created = client.create_deck(&input).await.unwrap();
        client.update_deck(created.id, &input.public(true)).await.unwrap();

        create.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_deck_no_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/decks/5");
                then.status(204);
            })
            .await;

        let (session, _) = session_with_token("abc");
        let client = client_for(&server.base_url(), session);

        client.delete_deck(5).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_deck_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/decks/404");
                then.status(404).json_body(json!({"error": "Deck not found"}));
            })
            .await;

        let (session, _) = session_with_token("abc");
        let client = client_for(&server.base_url(), session);

        let err = client.get_deck(404).await.unwrap_err();
        assert_eq!(err.to_string(), "Deck not found");
    }
}
