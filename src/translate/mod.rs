//! Text translation through an external provider
//!
//! - `languages`: the fixed set of supported language codes
//! - `client`: the provider trait and the MyMemory HTTP client
//! - `service`: request validation, same-language short-circuit, timeout and
//!   cancellation handling, and result checks

pub mod client;
pub mod languages;
pub mod service;

use thiserror::Error;

use crate::flashcards::ValidationError;

pub use client::{MyMemoryClient, TranslationProvider};
pub use languages::{supported_languages, Language, LanguageInfo};
pub use service::{Translation, TranslationRequest, Translator};

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Unsupported {role} language: {code}")]
    UnsupportedLanguage { role: &'static str, code: String },
    #[error("Translation provider returned identical text - it may not support this language pair")]
    IdenticalText,
    #[error("Translation provider returned an empty translation")]
    EmptyResult,
    #[error("Translation provider error: HTTP {status}")]
    Http { status: u16 },
    #[error("Translation timed out - please try again")]
    Timeout,
    #[error("Translation provider error: {0}")]
    Provider(String),
    #[error("Translation request failed: {0}")]
    Transport(String),
    #[error("Translation cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else if let Some(status) = e.status() {
            TranslateError::Http { status: status.as_u16() }
        } else {
            TranslateError::Transport(e.to_string())
        }
    }
}
