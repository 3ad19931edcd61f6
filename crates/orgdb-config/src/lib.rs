//! # orgdb-config
//!
//! Layered configuration loading for the organization directory using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ORGDB_*` prefix, `__` as separator)
//! 2. Project-level `.orgdb/config.toml`
//! 3. User-level `~/.config/orgdb/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ORGDB_DATABASE__PATH` -> `database.path`,
//! `ORGDB_HISTORY__MAX_ATTEMPTS` -> `history.max_attempts`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use orgdb_config::OrgDbConfig;
//!
//! let config = OrgDbConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod history;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use history::HistoryConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project directory holding the local config and default database.
pub const PROJECT_DIR: &str = ".orgdb";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrgDbConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

impl OrgDbConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.history.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_in(Path::new("."))
    }

    /// Provider chain with the project config looked up under `root`.
    #[must_use]
    pub fn figment_in(root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = root.join(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ORGDB_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("orgdb").join("config.toml"))
    }
}
