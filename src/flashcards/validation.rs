//! Field validation for deck and flashcard input
//!
//! Runs before any store access so a rejected request never leaves a partial write.

use std::fmt;

use serde::Serialize;

pub const TITLE_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const CARD_TEXT_MAX_CHARS: usize = 1000;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// One or more invalid fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "Invalid input data: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Accumulates field errors across one request
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim `value` and require it to be non-empty and at most `max` chars.
    pub fn required(&mut self, field: &'static str, label: &str, value: &str, max: usize) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, format!("{} is required", label));
        } else if trimmed.chars().count() > max {
            self.push(field, format!("{} is too long", label));
        }
        trimmed.to_string()
    }

    /// Like `required`, but blank input becomes `None` instead of an error.
    pub fn optional(&mut self, field: &'static str, label: &str, value: Option<&str>, max: usize) -> Option<String> {
        let trimmed = value.map(str::trim).filter(|v| !v.is_empty())?;
        if trimmed.chars().count() > max {
            self.push(field, format!("{} is too long", label));
        }
        Some(trimmed.to_string())
    }

    pub fn push(&mut self, field: &'static str, message: String) {
        self.errors.push(FieldError { field, message });
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError { errors: self.errors })
        }
    }
}

/// Normalized deck fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckFields {
    pub title: String,
    pub description: Option<String>,
}

/// Normalized flashcard fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFields {
    pub front: String,
    pub back: String,
}

pub fn validate_deck(title: &str, description: Option<&str>) -> Result<DeckFields, ValidationError> {
    let mut v = Validator::new();
    let title = v.required("title", "Title", title, TITLE_MAX_CHARS);
    let description = v.optional("description", "Description", description, DESCRIPTION_MAX_CHARS);
    v.finish(DeckFields { title, description })
}

pub fn validate_card(front: &str, back: &str) -> Result<CardFields, ValidationError> {
    let mut v = Validator::new();
    let front = v.required("front", "Front text", front, CARD_TEXT_MAX_CHARS);
    let back = v.required("back", "Back text", back, CARD_TEXT_MAX_CHARS);
    v.finish(CardFields { front, back })
}

/// Score and total must be non-negative and the score cannot exceed the total.
pub fn validate_session(score: i64, total_cards: i64) -> Result<(u32, u32), ValidationError> {
    let mut v = Validator::new();
    let score_ok = u32::try_from(score).ok();
    let total_ok = u32::try_from(total_cards).ok();
    if score_ok.is_none() {
        v.push("score", "Score must be a non-negative number".to_string());
    }
    if total_ok.is_none() {
        v.push("totalCards", "Total cards must be a non-negative number".to_string());
    }
    if let (Some(score), Some(total)) = (score_ok, total_ok) {
        if score > total {
            v.push("score", "Score cannot exceed the number of cards".to_string());
        }
    }
    v.finish((score_ok.unwrap_or(0), total_ok.unwrap_or(0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_title_bounds() {
        assert!(validate_deck("", None).unwrap_err().has_field("title"));
        assert!(validate_deck("   ", None).unwrap_err().has_field("title"));
        assert!(validate_deck(&"A".repeat(256), None).unwrap_err().has_field("title"));

        let ok = validate_deck(&"A".repeat(255), None).unwrap();
        assert_eq!(ok.title.len(), 255);
    }

    #[test]
    fn test_deck_description_normalized() {
        let fields = validate_deck(" Spanish ", Some("  ")).unwrap();
        assert_eq!(fields.title, "Spanish");
        assert_eq!(fields.description, None);

        let err = validate_deck("Spanish", Some(&"d".repeat(1001))).unwrap_err();
        assert!(err.has_field("description"));
        assert!(!err.has_field("title"));
    }

    #[test]
    fn test_lengths_count_chars_not_bytes() {
        // 255 multi-byte chars is still within bounds
        assert!(validate_deck(&"é".repeat(255), None).is_ok());
    }

    #[test]
    fn test_card_reports_every_bad_field() {
        let err = validate_card("", &"b".repeat(1001)).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert!(err.has_field("front"));
        assert!(err.has_field("back"));
        assert!(err.to_string().contains("Front text is required"));
    }

    #[test]
    fn test_session_bounds() {
        assert_eq!(validate_session(3, 5).unwrap(), (3, 5));
        assert!(validate_session(6, 5).unwrap_err().has_field("score"));
        assert!(validate_session(-1, 5).unwrap_err().has_field("score"));
        assert!(validate_session(0, -2).unwrap_err().has_field("totalCards"));
    }
}
