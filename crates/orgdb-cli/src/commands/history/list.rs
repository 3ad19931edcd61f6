use orgdb_core::entities::HistoryEntry;
use orgdb_core::responses::HistoryListResponse;
use serde_json::{Value, json};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_columns;

const TABLE_COLUMNS: &[&str] = &["version", "action", "changedBy", "timestamp", "changed"];

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries = ctx.service.get_history(id).await?;
    let rows = entries.iter().map(summary_row).collect::<Vec<_>>();

    let response = HistoryListResponse {
        organization_id: id.to_string(),
        entries,
    };
    output_columns(&response, &rows, TABLE_COLUMNS, flags.format)
}

/// One line per version: the names of changed fields instead of the values.
fn summary_row(entry: &HistoryEntry) -> Value {
    let changed = entry
        .changes
        .as_ref()
        .map(|changes| changes.keys().cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    json!({
        "version": entry.version,
        "action": entry.action,
        "changedBy": entry.changed_by,
        "timestamp": entry.timestamp,
        "changed": changed,
    })
}
