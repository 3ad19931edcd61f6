//! Database error types for orgdb-db.

use orgdb_core::errors::{CoreError, ErrorKind};
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The requested record or history version does not exist.
    #[error("Not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Caller input was rejected before touching storage.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    #[must_use]
    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    /// Coarse failure class for callers that report status.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            _ => ErrorKind::Storage,
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::Other(e) => Self::Other(e),
        }
    }
}
