//! Service layer hosting the version store and the record lifecycle.
//!
//! `DirectoryService` wraps `OrgDb` (raw database access) and the retry
//! policy for history writes. All repo methods are implemented as
//! `impl DirectoryService` blocks.

use orgdb_config::OrgDbConfig;

use crate::OrgDb;
use crate::error::DatabaseError;
use crate::retry::RetryConfig;

/// Orchestrates record mutations and their history entries.
///
/// Every mutation method follows this protocol:
/// 1. Read the current record (update, delete, rollback)
/// 2. Write the record (delete: write history first)
/// 3. Append the history entry
///
/// Steps 2 and 3 are separate writes. A failure between them is logged at
/// `error` level and returned; the record change is not undone.
pub struct DirectoryService {
    db: OrgDb,
    retry: RetryConfig,
}

impl DirectoryService {
    /// Open a local database with the default retry policy.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = OrgDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Open the database and retry policy described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &OrgDbConfig) -> Result<Self, DatabaseError> {
        let path = config
            .database
            .resolved_path()
            .map_err(|e| DatabaseError::Other(e.into()))?;
        let db = OrgDb::open_local(&path.to_string_lossy()).await?;
        Ok(Self::from_db(db).with_retry(RetryConfig::from(&config.history)))
    }

    /// Create from an existing `OrgDb` (for testing).
    #[must_use]
    pub fn from_db(db: OrgDb) -> Self {
        Self {
            db,
            retry: RetryConfig::default(),
        }
    }

    /// Replace the history retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &OrgDb {
        &self.db
    }

    #[must_use]
    pub const fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }
}
