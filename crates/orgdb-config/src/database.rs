//! Local database configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Default database file, relative to the working directory.
fn default_path() -> String {
    ".orgdb/orgdb.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the libSQL database file. `:memory:` opens a throwaway database.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the database lives only in memory.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// The database path, or `NotConfigured` if it was blanked out.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when `path` is empty.
    pub fn resolved_path(&self) -> Result<PathBuf, ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "database".into(),
            });
        }
        Ok(PathBuf::from(&self.path))
    }
}
