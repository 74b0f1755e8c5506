use crate::flashcards::{StudySession, StudySessionInput};
use crate::identity::UserId;
use crate::AppState;

use super::{lock_storage, parse_id, CommandResult};

pub fn list_study_sessions(
    state: &AppState,
    user: Option<&UserId>,
    deck_id: &str,
) -> CommandResult<Vec<StudySession>> {
    let id = parse_id(deck_id, "deck")?;
    let storage = lock_storage(state)?;
    storage.list_study_sessions(user, id).map_err(Into::into)
}

/// Record the score of a finished pass through a deck
pub fn record_study_session(
    state: &AppState,
    user: Option<&UserId>,
    deck_id: &str,
    input: StudySessionInput,
) -> CommandResult<StudySession> {
    let id = parse_id(deck_id, "deck")?;
    let mut storage = lock_storage(state)?;
    let session = storage.record_study_session(user, id, input.score, input.total_cards)?;
    log::info!("Recorded study session {}/{} for deck {}", session.score, session.total_cards, id);
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{alice, bob, create_test_state};
    use crate::commands::{create_deck, ErrorKind};
    use crate::flashcards::DeckInput;

    #[test]
    fn test_record_and_list_sessions() {
        let (state, _) = create_test_state();
        let deck = create_deck(
            &state,
            Some(&alice()),
            DeckInput {
                title: "Spanish".to_string(),
                description: None,
            },
        )
        .unwrap();
        let id = deck.id.to_string();

        let session = record_study_session(
            &state,
            Some(&alice()),
            &id,
            StudySessionInput { score: 4, total_cards: 5 },
        )
        .unwrap();
        assert_eq!(session.score, 4);

        let err = record_study_session(&state, Some(&alice()), &id, StudySessionInput { score: 6, total_cards: 5 })
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = record_study_session(&state, Some(&bob()), &id, StudySessionInput { score: 1, total_cards: 1 })
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = record_study_session(&state, None, &id, StudySessionInput { score: 1, total_cards: 1 })
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);

        assert_eq!(list_study_sessions(&state, Some(&alice()), &id).unwrap().len(), 1);
        assert!(list_study_sessions(&state, Some(&bob()), &id).unwrap().is_empty());
    }
}
