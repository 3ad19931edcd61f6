//! # orgdb-db
//!
//! libSQL storage for the organization directory.
//!
//! Holds the current organization records and their append-only version
//! history. [`service::DirectoryService`] hosts the version store
//! (`repos::history`), the record lifecycle (`repos::organization`), and bulk
//! import/export (`transfer`).

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod retry;
pub mod service;
pub mod transfer;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::path::Path;

use error::DatabaseError;
use libsql::Builder;
use orgdb_core::ids::format_id;

/// Central database handle.
///
/// Wraps a libSQL database and connection and provides ID generation.
pub struct OrgDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl OrgDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Creates the parent directory if needed and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::Other(anyhow::anyhow!(
                        "cannot create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let org_db = Self { db, conn };
        org_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(org_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL, e.g. `"org_3f1c…"` (32 hex chars).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT lower(hex(randomblob(16)))", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(format_id(prefix, &row.get::<String>(0)?))
    }
}
