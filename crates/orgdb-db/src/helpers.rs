//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed structs.
//! Timestamps are written with [`format_timestamp`] so that TEXT ordering
//! matches chronological ordering; [`parse_datetime`] also accepts `SQLite`'s
//! `datetime('now')` format for rows written by hand.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use orgdb_core::diff::ChangeSet;
use orgdb_core::snapshot::Snapshot;

use crate::error::DatabaseError;

/// Fixed-width RFC 3339 with microseconds and a `Z` suffix.
#[must_use]
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time truncated to the precision [`format_timestamp`] stores.
#[must_use]
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Parse a JSON-array TEXT column into a list of strings.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the column is not a JSON string array.
pub fn parse_string_list(s: &str) -> Result<Vec<String>, DatabaseError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(s)
        .map_err(|e| DatabaseError::Query(format!("Invalid list column '{s}': {e}")))
}

/// Serialize a list of strings for a JSON-array TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn string_list_json(items: &[String]) -> Result<String, DatabaseError> {
    serde_json::to_string(items).map_err(|e| DatabaseError::Other(e.into()))
}

/// Parse a TEXT column holding a JSON object snapshot.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the column is not a JSON object.
pub fn parse_snapshot(s: &str) -> Result<Snapshot, DatabaseError> {
    serde_json::from_str(s)
        .map_err(|e| DatabaseError::Query(format!("Invalid snapshot JSON: {e}")))
}

/// Parse a nullable TEXT column holding a change set.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not a change set.
pub fn parse_optional_changes(s: Option<&str>) -> Result<Option<ChangeSet>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let changes = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid changes JSON: {e}")))?;
            Ok(Some(changes))
        }
        _ => Ok(None),
    }
}

/// Convert an INTEGER column into a history version number.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for values outside `u32`.
pub fn version_from_i64(v: i64) -> Result<u32, DatabaseError> {
    u32::try_from(v).map_err(|_| DatabaseError::InvalidState(format!("version out of range: {v}")))
}
