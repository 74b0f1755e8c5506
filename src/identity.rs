//! Caller identity
//!
//! The identity provider sits outside this crate. It hands us an opaque user id per
//! request, or nothing when the caller is not signed in. Every gateway operation takes
//! that identity as an explicit `Option<&UserId>` argument.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Build an identity from raw provider output. Blank values mean "not signed in".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Rehydrate an id that was already validated before it was stored.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
