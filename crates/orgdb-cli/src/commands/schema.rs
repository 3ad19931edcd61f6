use orgdb_core::entities::{HistoryEntry, Organization, OrganizationFields};
use orgdb_core::errors::CoreError;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `orgdb schema`. Needs no database.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "organization" | "org" => schema_for!(Organization),
        "organization-fields" | "fields" => schema_for!(OrganizationFields),
        "history-entry" | "history" => schema_for!(HistoryEntry),
        other => {
            return Err(CoreError::Validation(format!(
                "unknown schema type '{other}' (expected organization, organization-fields, history-entry)"
            ))
            .into());
        }
    };
    output(&schema, flags.format)
}
