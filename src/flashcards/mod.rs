//! Decks, flashcards and study sessions
//!
//! This module provides:
//! - Deck CRUD scoped to the owning user
//! - Flashcard CRUD scoped through the owning deck
//! - Card counts recounted from the live collection on every card mutation
//! - Study session history per deck

pub mod models;
pub mod storage;
pub mod validation;

pub use models::*;
pub use storage::{FlashcardStorage, FlashcardStorageError};
pub use validation::{FieldError, ValidationError};
