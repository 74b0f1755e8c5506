//! Data models for decks, flashcards and study sessions

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::UserId;

/// Current time at the precision the store keeps (microseconds)
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A deck is a named collection of flashcards owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_id: UserId,
    /// Number of live flashcards in the deck, recounted on every card mutation
    #[serde(default)]
    pub card_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(user_id: UserId, title: String, description: Option<String>) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            user_id,
            card_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A flashcard with question (front) and answer (back).
///
/// Cards carry no owner of their own; they are visible only through a deck the caller owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub front: String,
    pub back: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn new(deck_id: Uuid, front: String, back: String) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4(),
            deck_id,
            front,
            back,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A completed pass through a deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub user_id: UserId,
    /// Cards answered correctly
    pub score: u32,
    pub total_cards: u32,
    pub completed_at: DateTime<Utc>,
}

impl StudySession {
    pub fn new(deck_id: Uuid, user_id: UserId, score: u32, total_cards: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            deck_id,
            user_id,
            score,
            total_cards,
            completed_at: now(),
        }
    }
}

/// Request body for creating or updating a deck
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for creating or updating a flashcard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardInput {
    pub front: String,
    pub back: String,
}

/// Request body for recording a study session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySessionInput {
    pub score: i64,
    pub total_cards: i64,
}
