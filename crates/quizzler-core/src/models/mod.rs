//! Data models for the Quizzler API
//!
//! These mirror the server's JSON. Timestamps are optional because auth
//! responses only carry the identity fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User model.
///
/// The server owns the shape of this record: fields the client does not
/// model are kept in `extra`, and an absent email is not written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response body of `/login` and `/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Credentials sent to `/login` and `/register`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Deck model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for creating or updating a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckInput {
    pub name: String,
    pub description: String,
    pub public: bool,
}

impl DeckInput {
    /// New private deck
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            public: false,
        }
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }
}

/// Card model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    #[serde(default)]
    pub deck_id: i64,
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for creating, updating or importing a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInput {
    pub front: String,
    pub back: String,
}

impl CardInput {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Body of `/decks/:id/cards/import`
#[derive(Debug, Clone, Serialize)]
pub struct ImportCardsRequest<'a> {
    pub cards: &'a [CardInput],
}

/// Response of `/decks/:id/cards/import`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_minimal_payload() {
        let user: User = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(user.id, 1);
        assert!(user.email.is_empty());
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_user_serialization_skips_missing_timestamps() {
        let user = User {
            id: 7,
            email: "a@b.com".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "email": "a@b.com"}));
    }

    #[test]
    fn test_user_keeps_unknown_fields() {
        let raw = serde_json::json!({"id": 1, "display_name": "Ann", "roles": ["admin"]});
        let user: User = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.extra["display_name"], "Ann");
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn test_deck_from_server_json() {
        let json = r#"{
            "id": 3,
            "user_id": 1,
            "name": "Spanish",
            "description": "Verbs",
            "public": true,
            "card_count": 12,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T10:00:00Z"
        }"#;
        let deck: Deck = serde_json::from_str(json).unwrap();
        assert_eq!(deck.name, "Spanish");
        assert!(deck.public);
        assert_eq!(deck.card_count, Some(12));
        assert!(deck.updated_at.is_some());
    }

    #[test]
    fn test_deck_without_card_count() {
        let json = r#"{"id":3,"user_id":1,"name":"x","description":"","public":false}"#;
        let deck: Deck = serde_json::from_str(json).unwrap();
        assert_eq!(deck.card_count, None);
    }

    #[test]
    fn test_deck_input_defaults_to_private() {
        let input = DeckInput::new("Kanji", "N5");
        assert!(!input.public);
        let json = serde_json::to_value(input.public(true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Kanji", "description": "N5", "public": true})
        );
    }

    #[test]
    fn test_import_request_shape() {
        let cards = vec![CardInput::new("hola", "hello")];
        let json = serde_json::to_value(ImportCardsRequest { cards: &cards }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"cards": [{"front": "hola", "back": "hello"}]})
        );
    }
}
