//! Record snapshots.
//!
//! A snapshot is the JSON object form of a record at one point in time. The
//! diff engine and the history log work on snapshots rather than typed
//! entities so old versions stay readable after the schema grows.

use serde::Serialize;
use serde_json::Value;

use crate::errors::CoreError;

/// Field mapping of a record, keyed by the serialized field name.
pub type Snapshot = serde_json::Map<String, Value>;

/// Keys that belong to the storage layer and are never persisted in history.
pub const STORAGE_INTERNAL_KEYS: &[&str] = &["_id", "__v"];

/// Keys excluded from diffs: storage internals plus audit fields.
pub const METADATA_KEYS: &[&str] = &[
    "_id",
    "__v",
    "createdAt",
    "updatedAt",
    "createdBy",
    "updatedBy",
];

/// Whether `key` is storage or audit metadata.
#[must_use]
pub fn is_metadata_key(key: &str) -> bool {
    METADATA_KEYS.contains(&key)
}

/// Serialize a value into a snapshot.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the value does not serialize to a JSON
/// object, or `CoreError::Other` if serialization itself fails.
pub fn to_snapshot<T: Serialize>(value: &T) -> Result<Snapshot, CoreError> {
    match serde_json::to_value(value).map_err(|e| CoreError::Other(e.into()))? {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::Validation(format!(
            "expected an object snapshot, got {other}"
        ))),
    }
}

/// Copy of `snapshot` without storage-internal keys.
#[must_use]
pub fn strip_storage_internal(snapshot: &Snapshot) -> Snapshot {
    snapshot
        .iter()
        .filter(|(key, _)| !STORAGE_INTERNAL_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Copy of `snapshot` without any metadata keys.
#[must_use]
pub fn strip_metadata(snapshot: &Snapshot) -> Snapshot {
    snapshot
        .iter()
        .filter(|(key, _)| !is_metadata_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
