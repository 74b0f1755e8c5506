//! Commands shared by the HTTP API and the CLI
//!
//! Each command takes the application state and the caller's identity explicitly,
//! runs one gateway, lookup or translation operation, and turns every failure into a
//! `CommandError` with a stable `kind`.

mod deck;
mod flashcard;
mod history;
mod session;
mod translate;

pub use deck::*;
pub use flashcard::*;
pub use history::*;
pub use session::*;
pub use translate::*;

use std::fmt;
use std::sync::MutexGuard;

use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::flashcards::{FlashcardStorage, FlashcardStorageError, ValidationError};
use crate::history::LookupError;
use crate::translate::TranslateError;
use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthenticated,
    NotFound,
    Validation,
    NoAnswerFound,
    TranslationUnavailable,
    TranslationTimeout,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Validation => "validation",
            ErrorKind::NoAnswerFound => "no_answer_found",
            ErrorKind::TranslationUnavailable => "translation_unavailable",
            ErrorKind::TranslationTimeout => "translation_timeout",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl CommandError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Internal => log::error!("Command failed ({}): {}", kind, message),
            _ => log::warn!("Command failed ({}): {}", kind, message),
        }
        Self {
            kind,
            message,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn not_found(what: &str) -> Self {
        Self::new(ErrorKind::NotFound, format!("{} not found or access denied", what))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl std::error::Error for CommandError {}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        let details = serde_json::to_value(&err.errors).unwrap_or(Value::Null);
        Self::new(ErrorKind::Validation, err.to_string()).with_details(details)
    }
}

impl From<FlashcardStorageError> for CommandError {
    fn from(err: FlashcardStorageError) -> Self {
        match err {
            FlashcardStorageError::Unauthenticated => {
                Self::new(ErrorKind::Unauthenticated, "Authentication required")
            }
            FlashcardStorageError::DeckNotFound(_) => Self::not_found("Deck"),
            FlashcardStorageError::Validation(v) => v.into(),
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<LookupError> for CommandError {
    fn from(err: LookupError) -> Self {
        let LookupError::NoAnswerFound { hint, suggestions } = err;
        Self::new(
            ErrorKind::NoAnswerFound,
            "Unable to generate answer for this question. Please try a different British History question.",
        )
        .with_details(json!({ "hint": hint, "suggestions": suggestions }))
    }
}

impl From<TranslateError> for CommandError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::Validation(v) => v.into(),
            TranslateError::UnsupportedLanguage { .. } => Self::new(ErrorKind::Validation, err.to_string()),
            TranslateError::Timeout => Self::new(ErrorKind::TranslationTimeout, err.to_string()),
            other => Self::new(
                ErrorKind::TranslationUnavailable,
                "Free translation service temporarily unavailable. Please try again later.",
            )
            .with_details(json!(other.to_string())),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

pub(crate) fn lock_storage(state: &AppState) -> CommandResult<MutexGuard<'_, FlashcardStorage>> {
    state
        .flashcard_storage
        .lock()
        .map_err(|_| CommandError::internal("Flashcard storage lock poisoned"))
}

pub(crate) fn parse_id(raw: &str, what: &str) -> CommandResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|e| {
        CommandError::new(ErrorKind::Validation, format!("Invalid {} ID: {}", what, e))
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::validation::Validator;

    #[test]
    fn test_storage_errors_map_to_kinds() {
        let err: CommandError = FlashcardStorageError::Unauthenticated.into();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);

        let err: CommandError = FlashcardStorageError::DeckNotFound(Uuid::new_v4()).into();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let mut v = Validator::new();
        v.required("title", "Title", "  ", 255);
        let err: CommandError = FlashcardStorageError::Validation(v.finish(()).unwrap_err()).into();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.details.unwrap()[0]["field"], "title");
    }

    #[test]
    fn test_translate_errors_map_to_kinds() {
        let err: CommandError = TranslateError::Timeout.into();
        assert_eq!(err.kind, ErrorKind::TranslationTimeout);

        let err: CommandError = TranslateError::IdenticalText.into();
        assert_eq!(err.kind, ErrorKind::TranslationUnavailable);
        assert!(err.details.is_some());

        let err: CommandError = TranslateError::UnsupportedLanguage {
            role: "source",
            code: "xx".to_string(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Unsupported source language: xx");
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "deck").unwrap(), id);
        let err = parse_id("not-a-uuid", "deck").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.starts_with("Invalid deck ID"));
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ErrorKind::NoAnswerFound).unwrap(), "\"no_answer_found\"");
    }
}
