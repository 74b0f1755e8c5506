use crate::flashcards::{Flashcard, FlashcardInput};
use crate::identity::UserId;
use crate::revalidate::{deck_path, DASHBOARD_PATH};
use crate::AppState;

use super::{lock_storage, parse_id, CommandError, CommandResult};

fn revalidate_deck(state: &AppState, card: &Flashcard) {
    state.revalidator.revalidate(&deck_path(&card.deck_id));
    state.revalidator.revalidate(DASHBOARD_PATH);
}

// ==================== Card Commands ====================

/// List the cards of one of the caller's decks
pub fn list_flashcards(state: &AppState, user: Option<&UserId>, deck_id: &str) -> CommandResult<Vec<Flashcard>> {
    let id = parse_id(deck_id, "deck")?;
    let storage = lock_storage(state)?;
    storage.list_flashcards(user, id).map_err(Into::into)
}

pub fn get_flashcard(state: &AppState, user: Option<&UserId>, card_id: &str) -> CommandResult<Flashcard> {
    let id = parse_id(card_id, "flashcard")?;
    let storage = lock_storage(state)?;
    storage
        .get_flashcard(user, id)?
        .ok_or_else(|| CommandError::not_found("Flashcard"))
}

pub fn create_flashcard(
    state: &AppState,
    user: Option<&UserId>,
    deck_id: &str,
    input: FlashcardInput,
) -> CommandResult<Flashcard> {
    let id = parse_id(deck_id, "deck")?;
    let card = {
        let mut storage = lock_storage(state)?;
        storage.create_flashcard(user, id, &input.front, &input.back)?
    };

    revalidate_deck(state, &card);
    Ok(card)
}

pub fn update_flashcard(
    state: &AppState,
    user: Option<&UserId>,
    card_id: &str,
    input: FlashcardInput,
) -> CommandResult<Flashcard> {
    let id = parse_id(card_id, "flashcard")?;
    let card = {
        let mut storage = lock_storage(state)?;
        storage
            .update_flashcard(user, id, &input.front, &input.back)?
            .ok_or_else(|| CommandError::not_found("Flashcard"))?
    };

    revalidate_deck(state, &card);
    Ok(card)
}

/// Delete a card; the deck's card count is recounted in the same transaction
pub fn delete_flashcard(state: &AppState, user: Option<&UserId>, card_id: &str) -> CommandResult<()> {
    let id = parse_id(card_id, "flashcard")?;
    let card = {
        let mut storage = lock_storage(state)?;
        storage
            .delete_flashcard(user, id)?
            .ok_or_else(|| CommandError::not_found("Flashcard"))?
    };

    revalidate_deck(state, &card);
    Ok(())
}
