//! JSON array export of organizations, JSONL export of history.

use std::path::Path;

use tracing::info;

use orgdb_core::responses::ExportResponse;
use orgdb_core::snapshot::Snapshot;

use crate::error::DatabaseError;
use crate::service::DirectoryService;

/// Audit timestamps dropped from exported records.
const EXPORT_OMITTED_KEYS: &[&str] = &["createdAt", "updatedAt"];

fn count(n: usize) -> Result<u32, DatabaseError> {
    u32::try_from(n).map_err(|_| DatabaseError::InvalidState(format!("too many rows to export: {n}")))
}

impl DirectoryService {
    /// Every organization as an export record, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn export_organizations(&self) -> Result<Vec<Snapshot>, DatabaseError> {
        self.list_organizations(0)
            .await?
            .iter()
            .map(|org| -> Result<Snapshot, DatabaseError> {
                let mut snapshot = org.snapshot()?;
                for key in EXPORT_OMITTED_KEYS {
                    snapshot.remove(*key);
                }
                Ok(snapshot)
            })
            .collect()
    }

    /// Write organizations as a pretty JSON array to `path` and, optionally,
    /// the full history log as JSONL to `history_path`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query or a file write fails.
    pub async fn export_to_files(
        &self,
        path: &Path,
        history_path: Option<&Path>,
    ) -> Result<ExportResponse, DatabaseError> {
        let records = self.export_organizations().await?;
        let body =
            serde_json::to_string_pretty(&records).map_err(|e| DatabaseError::Other(e.into()))?;
        std::fs::write(path, body).map_err(|e| DatabaseError::Other(e.into()))?;

        let mut history_entries = 0;
        if let Some(history_path) = history_path {
            let entries = self.list_all_history().await?;
            serde_jsonlines::write_json_lines(history_path, &entries)
                .map_err(|e| DatabaseError::Other(e.into()))?;
            history_entries = count(entries.len())?;
        }

        let response = ExportResponse {
            path: path.display().to_string(),
            organizations: count(records.len())?,
            history_path: history_path.map(|p| p.display().to_string()),
            history_entries,
        };
        info!(
            organizations = response.organizations,
            history_entries = response.history_entries,
            "export finished"
        );
        Ok(response)
    }
}
