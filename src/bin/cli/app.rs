use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use flashdeck_lib::config::AppConfig;
use flashdeck_lib::identity::UserId;
use flashdeck_lib::AppState;

/// Shared application state for CLI commands
pub struct App {
    pub state: AppState,
    pub user: Option<UserId>,
}

impl App {
    /// Load config, open the database and resolve the acting user
    pub fn new(config_path: Option<&Path>, db_override: Option<PathBuf>, user: Option<&str>) -> Result<Self> {
        let mut config = AppConfig::load(config_path).context("Failed to load configuration")?;
        if let Some(db) = db_override {
            config.database.path = Some(db);
        }

        let state = AppState::from_config(&config).context("Failed to open flashcard database")?;
        let user = user.and_then(UserId::parse);
        if user.is_none() {
            log::debug!("No user given; reads return nothing and writes are rejected");
        }

        Ok(Self { state, user })
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }
}
