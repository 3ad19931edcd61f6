//! Version store: append-only history entries per organization.
//!
//! Versions start at 1 and increase by one per entry with no gaps. The next
//! number is claimed inside the INSERT itself, and a lost race on the
//! `(organization_id, version)` key is retried per [`RetryConfig`].
//!
//! [`RetryConfig`]: crate::retry::RetryConfig

use chrono::Utc;
use tracing::{debug, warn};

use orgdb_core::diff::compute_changes;
use orgdb_core::entities::HistoryEntry;
use orgdb_core::enums::HistoryAction;
use orgdb_core::snapshot::{Snapshot, strip_storage_internal};

use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_string, parse_datetime, parse_enum, parse_optional_changes,
    parse_snapshot, version_from_i64,
};
use crate::retry::is_version_conflict;
use crate::service::DirectoryService;

const SELECT_COLS: &str = "organization_id, version, action, data, changes, changed_by, timestamp";

/// Claims `MAX(version) + 1` and a timestamp no earlier than the previous
/// entry's in one statement.
const INSERT_NEXT_VERSION: &str = "INSERT INTO organization_history
        (organization_id, version, action, data, changes, changed_by, timestamp)
     SELECT ?1, COALESCE(MAX(version), 0) + 1, ?2, ?3, ?4, ?5,
            MAX(?6, COALESCE(MAX(timestamp), ?6))
     FROM organization_history WHERE organization_id = ?1
     RETURNING version, timestamp";

fn row_to_history(row: &libsql::Row) -> Result<HistoryEntry, DatabaseError> {
    Ok(HistoryEntry {
        organization_id: row.get::<String>(0)?,
        version: version_from_i64(row.get::<i64>(1)?)?,
        action: parse_enum(&row.get::<String>(2)?)?,
        data: parse_snapshot(&row.get::<String>(3)?)?,
        changes: parse_optional_changes(get_opt_string(row, 4)?.as_deref())?,
        changed_by: row.get::<String>(5)?,
        timestamp: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl DirectoryService {
    /// Append a history entry for `organization_id`.
    ///
    /// `changes` is computed from `old` and `new` for `Updated` entries only.
    /// Storage-internal keys are stripped from the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an empty actor, and any
    /// storage error once retries are exhausted.
    pub async fn save_version(
        &self,
        organization_id: &str,
        action: HistoryAction,
        new: &Snapshot,
        old: Option<&Snapshot>,
        actor: &str,
    ) -> Result<HistoryEntry, DatabaseError> {
        if actor.trim().is_empty() {
            return Err(DatabaseError::Validation(
                "history entries require a changedBy actor".into(),
            ));
        }

        let changes = action
            .records_changes()
            .then(|| compute_changes(old, Some(new)));
        let data = strip_storage_internal(new);

        let data_json = serde_json::to_string(&data).map_err(|e| DatabaseError::Other(e.into()))?;
        let changes_json = changes
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DatabaseError::Other(e.into()))?;

        let retry = self.retry_config();
        let mut attempt = 1;
        let (version, timestamp) = loop {
            let now = format_timestamp(&Utc::now());
            match self
                .insert_next_version(
                    organization_id,
                    action,
                    &data_json,
                    changes_json.as_deref(),
                    actor,
                    &now,
                )
                .await
            {
                Ok(claimed) => break claimed,
                Err(DatabaseError::LibSql(e))
                    if is_version_conflict(&e) && attempt < retry.max_attempts =>
                {
                    let delay = retry.delay_for(attempt);
                    warn!(
                        organization_id,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "history version conflict, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        debug!(organization_id, version, action = %action, actor, "history entry saved");

        Ok(HistoryEntry {
            organization_id: organization_id.to_string(),
            version,
            action,
            data,
            changes,
            changed_by: actor.to_string(),
            timestamp,
        })
    }

    async fn insert_next_version(
        &self,
        organization_id: &str,
        action: HistoryAction,
        data_json: &str,
        changes_json: Option<&str>,
        actor: &str,
        now: &str,
    ) -> Result<(u32, chrono::DateTime<Utc>), DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                INSERT_NEXT_VERSION,
                libsql::params![
                    organization_id,
                    action.as_str(),
                    data_json,
                    changes_json,
                    actor,
                    now
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let version = version_from_i64(row.get::<i64>(0)?)?;
        let timestamp = parse_datetime(&row.get::<String>(1)?)?;
        Ok((version, timestamp))
    }

    /// Full history of one organization, newest version first.
    ///
    /// Works for organizations that have since been deleted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row is malformed.
    pub async fn get_history(
        &self,
        organization_id: &str,
    ) -> Result<Vec<HistoryEntry>, DatabaseError> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM organization_history
             WHERE organization_id = ?1 ORDER BY version DESC"
        );
        let mut rows = self.db().conn().query(&sql, [organization_id]).await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_history(&row)?);
        }
        Ok(entries)
    }

    /// One specific version, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row is malformed.
    pub async fn get_version(
        &self,
        organization_id: &str,
        version: u32,
    ) -> Result<Option<HistoryEntry>, DatabaseError> {
        if version == 0 {
            return Ok(None);
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM organization_history
             WHERE organization_id = ?1 AND version = ?2"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params![organization_id, i64::from(version)])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_history(&row)?)),
            None => Ok(None),
        }
    }

    /// Highest version recorded for `organization_id`, 0 if none.
    ///
    /// Storage failures are logged and reported as 0.
    pub async fn get_latest_version(&self, organization_id: &str) -> u32 {
        match self.try_latest_version(organization_id).await {
            Ok(version) => version,
            Err(e) => {
                warn!(organization_id, error = %e, "latest version lookup failed, reporting 0");
                0
            }
        }
    }

    async fn try_latest_version(&self, organization_id: &str) -> Result<u32, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COALESCE(MAX(version), 0) FROM organization_history WHERE organization_id = ?1",
                [organization_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        version_from_i64(row.get::<i64>(0)?)
    }

    /// Every history entry, ordered by organization then ascending version.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row is malformed.
    pub async fn list_all_history(&self) -> Result<Vec<HistoryEntry>, DatabaseError> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM organization_history ORDER BY organization_id, version"
        );
        let mut rows = self.db().conn().query(&sql, ()).await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_history(&row)?);
        }
        Ok(entries)
    }
}
