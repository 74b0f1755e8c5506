//! Application configuration
//!
//! Loaded from an optional TOML file, then overridden by `FLASHDECK_*` environment
//! variables. Every field has a default, so an empty file (or no file) is valid.

use std::env;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::translate::client::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};

pub const CONFIG_ENV: &str = "FLASHDECK_CONFIG";
pub const HOST_ENV: &str = "FLASHDECK_HOST";
pub const PORT_ENV: &str = "FLASHDECK_PORT";
pub const DB_ENV: &str = "FLASHDECK_DB";
pub const TRANSLATE_URL_ENV: &str = "FLASHDECK_TRANSLATE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("No data directory available; set FLASHDECK_DB or [database] path")]
    NoDataDir,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Falls back to the platform data directory when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Load from `path` (or `FLASHDECK_CONFIG`), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => {
                log::debug!("No config file given, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would leave a service unusable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.translation.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "translation.timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `FLASHDECK_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = parse_override(&lookup, PORT_ENV)? {
            self.server.port = port;
        }
        if let Some(db) = lookup(DB_ENV) {
            self.database.path = Some(PathBuf::from(db));
        }
        if let Some(url) = lookup(TRANSLATE_URL_ENV) {
            self.translation.endpoint = url;
        }
        Ok(())
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Configured database path, or `<data dir>/flashdeck/flashdeck.db`
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => dirs::data_local_dir()
                .map(|dir| dir.join("flashdeck").join("flashdeck.db"))
                .ok_or(ConfigError::NoDataDir),
        }
    }
}

fn parse_override<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                message: e.to_string(),
            })
        })
        .transpose()
}
