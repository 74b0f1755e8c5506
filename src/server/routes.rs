use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::commands::{self, CommandError, CommandResult, HistoryAnswer, HistoryQuestion, TranslationServiceInfo};
use crate::flashcards::{Deck, DeckInput, Flashcard, FlashcardInput, StudySession, StudySessionInput};
use crate::history::HistoryServiceInfo;
use crate::identity::UserId;
use crate::translate::{Translation, TranslationRequest};
use crate::AppState;

use super::auth::CurrentUser;

type SharedState = State<Arc<AppState>>;
type JsonBody<T> = Result<Json<T>, JsonRejection>;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Run a storage command on the blocking pool; rusqlite calls block
async fn blocking<T, F>(state: Arc<AppState>, user: CurrentUser, f: F) -> CommandResult<T>
where
    F: FnOnce(&AppState, Option<&UserId>) -> CommandResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&state, user.user()))
        .await
        .map_err(|e| CommandError::internal(format!("Storage task failed: {}", e)))?
}

// ==================== Decks ====================

pub async fn list_decks(State(state): SharedState, user: CurrentUser) -> CommandResult<Json<Vec<Deck>>> {
    blocking(state, user, commands::list_decks).await.map(Json)
}

pub async fn create_deck(
    State(state): SharedState,
    user: CurrentUser,
    body: JsonBody<DeckInput>,
) -> CommandResult<(StatusCode, Json<Deck>)> {
    let Json(input) = body?;
    let deck = blocking(state, user, move |s, u| commands::create_deck(s, u, input)).await?;
    Ok((StatusCode::CREATED, Json(deck)))
}

pub async fn get_deck(
    State(state): SharedState,
    user: CurrentUser,
    Path(deck_id): Path<String>,
) -> CommandResult<Json<Deck>> {
    blocking(state, user, move |s, u| commands::get_deck(s, u, &deck_id))
        .await
        .map(Json)
}

pub async fn update_deck(
    State(state): SharedState,
    user: CurrentUser,
    Path(deck_id): Path<String>,
    body: JsonBody<DeckInput>,
) -> CommandResult<Json<Deck>> {
    let Json(input) = body?;
    blocking(state, user, move |s, u| commands::update_deck(s, u, &deck_id, input))
        .await
        .map(Json)
}

pub async fn delete_deck(
    State(state): SharedState,
    user: CurrentUser,
    Path(deck_id): Path<String>,
) -> CommandResult<StatusCode> {
    blocking(state, user, move |s, u| commands::delete_deck(s, u, &deck_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Flashcards ====================

pub async fn list_flashcards(
    State(state): SharedState,
    user: CurrentUser,
    Path(deck_id): Path<String>,
) -> CommandResult<Json<Vec<Flashcard>>> {
    blocking(state, user, move |s, u| commands::list_flashcards(s, u, &deck_id))
        .await
        .map(Json)
}

pub async fn create_flashcard(
    State(state): SharedState,
    user: CurrentUser,
    Path(deck_id): Path<String>,
    body: JsonBody<FlashcardInput>,
) -> CommandResult<(StatusCode, Json<Flashcard>)> {
    let Json(input) = body?;
    let card = blocking(state, user, move |s, u| commands::create_flashcard(s, u, &deck_id, input)).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn get_flashcard(
    State(state): SharedState,
    user: CurrentUser,
    Path(card_id): Path<String>,
) -> CommandResult<Json<Flashcard>> {
    blocking(state, user, move |s, u| commands::get_flashcard(s, u, &card_id))
        .await
        .map(Json)
}

pub async fn update_flashcard(
    State(state): SharedState,
    user: CurrentUser,
    Path(card_id): Path<String>,
    body: JsonBody<FlashcardInput>,
) -> CommandResult<Json<Flashcard>> {
    let Json(input) = body?;
    blocking(state, user, move |s, u| commands::update_flashcard(s, u, &card_id, input))
        .await
        .map(Json)
}

pub async fn delete_flashcard(
    State(state): SharedState,
    user: CurrentUser,
    Path(card_id): Path<String>,
) -> CommandResult<StatusCode> {
    blocking(state, user, move |s, u| commands::delete_flashcard(s, u, &card_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Study sessions ====================

pub async fn list_sessions(
    State(state): SharedState,
    user: CurrentUser,
    Path(deck_id): Path<String>,
) -> CommandResult<Json<Vec<StudySession>>> {
    blocking(state, user, move |s, u| commands::list_study_sessions(s, u, &deck_id))
        .await
        .map(Json)
}

pub async fn record_session(
    State(state): SharedState,
    user: CurrentUser,
    Path(deck_id): Path<String>,
    body: JsonBody<StudySessionInput>,
) -> CommandResult<(StatusCode, Json<StudySession>)> {
    let Json(input) = body?;
    let session = blocking(state, user, move |s, u| commands::record_study_session(s, u, &deck_id, input)).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

// ==================== Lookup and translation ====================

pub async fn history_info() -> Json<HistoryServiceInfo> {
    Json(commands::history_info())
}

pub async fn ask_history(user: CurrentUser, body: JsonBody<HistoryQuestion>) -> CommandResult<Json<HistoryAnswer>> {
    let Json(input) = body?;
    commands::ask_history(user.user(), input).map(Json)
}

pub async fn translation_info(State(state): SharedState) -> Json<TranslationServiceInfo> {
    Json(commands::translation_info(&state))
}

pub async fn translate(
    State(state): SharedState,
    user: CurrentUser,
    body: JsonBody<TranslationRequest>,
) -> CommandResult<Json<Translation>> {
    let Json(request) = body?;
    let cancel = state.shutdown.child_token();
    commands::translate_text(&state, user.user(), request, &cancel)
        .await
        .map(Json)
}
