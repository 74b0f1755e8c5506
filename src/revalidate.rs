//! Cache-invalidation signals for views that render deck data
//!
//! Commands call a `Revalidator` after each successful mutation with the view paths
//! whose data changed. The server logs them; tests record them.

use std::sync::Mutex;

use uuid::Uuid;

pub const DASHBOARD_PATH: &str = "/dashboard";

pub fn deck_path(deck_id: &Uuid) -> String {
    format!("/decks/{}", deck_id)
}

pub trait Revalidator: Send + Sync {
    fn revalidate(&self, path: &str);
}

/// Emits each signal as a log line
#[derive(Debug, Default)]
pub struct LogRevalidator;

impl Revalidator for LogRevalidator {
    fn revalidate(&self, path: &str) {
        log::info!("Revalidate {}", path);
    }
}

/// Keeps every signal in order, for inspection
#[derive(Debug, Default)]
pub struct RecordingRevalidator {
    paths: Mutex<Vec<String>>,
}

impl RecordingRevalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded paths
    pub fn take(&self) -> Vec<String> {
        match self.paths.lock() {
            Ok(mut paths) => std::mem::take(&mut *paths),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Revalidator for RecordingRevalidator {
    fn revalidate(&self, path: &str) {
        match self.paths.lock() {
            Ok(mut paths) => paths.push(path.to_string()),
            Err(poisoned) => poisoned.into_inner().push(path.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_revalidator_drains() {
        let r = RecordingRevalidator::new();
        let id = Uuid::new_v4();
        r.revalidate(&deck_path(&id));
        r.revalidate(DASHBOARD_PATH);

        assert_eq!(r.take(), vec![format!("/decks/{}", id), "/dashboard".to_string()]);
        assert!(r.take().is_empty());
    }
}
