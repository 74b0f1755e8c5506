use crate::flashcards::{Deck, DeckInput};
use crate::identity::UserId;
use crate::revalidate::{deck_path, DASHBOARD_PATH};
use crate::AppState;

use super::{lock_storage, parse_id, CommandError, CommandResult};

// ==================== Deck Commands ====================

/// List the caller's decks
pub fn list_decks(state: &AppState, user: Option<&UserId>) -> CommandResult<Vec<Deck>> {
    let storage = lock_storage(state)?;
    storage.list_decks(user).map_err(Into::into)
}

/// Get one of the caller's decks
pub fn get_deck(state: &AppState, user: Option<&UserId>, deck_id: &str) -> CommandResult<Deck> {
    let id = parse_id(deck_id, "deck")?;
    let storage = lock_storage(state)?;
    storage
        .get_deck(user, id)?
        .ok_or_else(|| CommandError::not_found("Deck"))
}

pub fn create_deck(state: &AppState, user: Option<&UserId>, input: DeckInput) -> CommandResult<Deck> {
    let deck = {
        let mut storage = lock_storage(state)?;
        storage.create_deck(user, &input.title, input.description.as_deref())?
    };

    log::info!("Created deck {}", deck.id);
    state.revalidator.revalidate(DASHBOARD_PATH);
    Ok(deck)
}

pub fn update_deck(
    state: &AppState,
    user: Option<&UserId>,
    deck_id: &str,
    input: DeckInput,
) -> CommandResult<Deck> {
    let id = parse_id(deck_id, "deck")?;
    let deck = {
        let mut storage = lock_storage(state)?;
        storage
            .update_deck(user, id, &input.title, input.description.as_deref())?
            .ok_or_else(|| CommandError::not_found("Deck"))?
    };

    state.revalidator.revalidate(&deck_path(&deck.id));
    state.revalidator.revalidate(DASHBOARD_PATH);
    Ok(deck)
}

/// Delete a deck with all of its cards and sessions
pub fn delete_deck(state: &AppState, user: Option<&UserId>, deck_id: &str) -> CommandResult<()> {
    let id = parse_id(deck_id, "deck")?;
    let removed = {
        let mut storage = lock_storage(state)?;
        storage.delete_deck(user, id)?
    };
    if !removed {
        return Err(CommandError::not_found("Deck"));
    }

    log::info!("Deleted deck {}", id);
    state.revalidator.revalidate(DASHBOARD_PATH);
    Ok(())
}

/// Rebuild a deck's card count from its live cards
pub fn recount_deck(state: &AppState, user: Option<&UserId>, deck_id: &str) -> CommandResult<usize> {
    let id = parse_id(deck_id, "deck")?;
    let count = {
        let mut storage = lock_storage(state)?;
        storage
            .recount_deck(user, id)?
            .ok_or_else(|| CommandError::not_found("Deck"))?
    };

    state.revalidator.revalidate(&deck_path(&id));
    state.revalidator.revalidate(DASHBOARD_PATH);
    Ok(count)
}
