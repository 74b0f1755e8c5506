pub mod commands;
pub mod config;
pub mod flashcards;
pub mod history;
pub mod identity;
pub mod revalidate;
pub mod server;
pub mod translate;

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use config::{AppConfig, ConfigError};
use flashcards::{FlashcardStorage, FlashcardStorageError};
use revalidate::{LogRevalidator, Revalidator};
use translate::{MyMemoryClient, TranslateError, Translator};

/// Shared state behind every command
pub struct AppState {
    pub flashcard_storage: Mutex<FlashcardStorage>,
    pub translator: Translator,
    pub revalidator: Arc<dyn Revalidator>,
    /// Cancelled on shutdown; in-flight translations use child tokens
    pub shutdown: CancellationToken,
}

#[derive(Error, Debug)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to open flashcard database: {0}")]
    Storage(#[from] FlashcardStorageError),
    #[error("Failed to build translation client: {0}")]
    Translation(#[from] TranslateError),
}

impl AppState {
    pub fn new(storage: FlashcardStorage, translator: Translator, revalidator: Arc<dyn Revalidator>) -> Self {
        Self {
            flashcard_storage: Mutex::new(storage),
            translator,
            revalidator,
            shutdown: CancellationToken::new(),
        }
    }

    /// Open the database and build the MyMemory client described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self, InitError> {
        let db_path = config.database_path()?;
        let storage = FlashcardStorage::open(db_path)?;
        let client = MyMemoryClient::new(
            config.translation.endpoint.clone(),
            &config.translation.user_agent,
            config.translation.timeout(),
        )?;
        let translator = Translator::new(Arc::new(client), config.translation.timeout());

        Ok(Self::new(storage, translator, Arc::new(LogRevalidator)))
    }
}
