use clap::{Args, Subcommand};

use crate::cli::subcommands::{HistoryCommands, OrgCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Organization records.
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
    /// Version history of a record.
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
    /// Import organizations from a JSON array file.
    Import(ImportArgs),
    /// Export organizations (and optionally history) to files.
    Export(ExportArgs),
    /// Directory-wide counts.
    Stats,
    /// Print the JSON Schema of a record type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// JSON file holding an array of organizations.
    pub file: String,
    /// append (skip existing IDs) or replace (delete everything first).
    #[arg(long, default_value = "append")]
    pub mode: String,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Output path for the organizations JSON array.
    pub file: String,
    /// Also write the full history log as JSONL to this path.
    #[arg(long)]
    pub history: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// organization, organization-fields, history-entry
    pub type_name: String,
}
