use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::diff::ChangeSet;
use crate::enums::HistoryAction;
use crate::snapshot::Snapshot;

/// One immutable version of an organization in the history log.
///
/// `(organization_id, version)` is unique. `changes` is only set for
/// `HistoryAction::Updated`. The organization may no longer exist.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub organization_id: String,
    pub version: u32,
    pub action: HistoryAction,
    pub data: Snapshot,
    pub changes: Option<ChangeSet>,
    pub changed_by: String,
    pub timestamp: DateTime<Utc>,
}
