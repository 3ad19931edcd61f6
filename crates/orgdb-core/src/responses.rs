//! Response types returned as JSON by `orgdb` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{HistoryEntry, Organization};
use crate::enums::ImportMode;

/// Response from `orgdb org delete`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// Response from `orgdb history rollback`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RollbackResponse {
    pub organization: Organization,
    pub restored_version: u32,
    pub new_version: u32,
}

/// Response from `orgdb history latest`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LatestVersionResponse {
    pub organization_id: String,
    pub latest_version: u32,
}

/// Response from `orgdb history list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HistoryListResponse {
    pub organization_id: String,
    pub entries: Vec<HistoryEntry>,
}

/// Response from `orgdb stats`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatsResponse {
    pub total: u64,
    pub with_website: u64,
    pub flagged_for_review: u64,
}

/// Response from `orgdb import`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportResponse {
    pub mode: ImportMode,
    pub deleted: u32,
    pub imported: u32,
    pub skipped: u32,
}

/// Response from `orgdb export`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportResponse {
    pub path: String,
    pub organizations: u32,
    pub history_path: Option<String>,
    pub history_entries: u32,
}
