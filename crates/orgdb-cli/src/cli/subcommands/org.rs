use clap::Subcommand;

/// Organization record commands.
///
/// Field input comes from `--json`/`--file` (a JSON object keyed by field
/// name) overlaid with repeated `--set "Field=value"`; `value` is parsed as
/// JSON when it parses, otherwise taken as text.
#[derive(Clone, Debug, Subcommand)]
pub enum OrgCommands {
    /// Create an organization.
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        json: Option<String>,
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        set: Vec<String>,
    },
    /// Get an organization by ID.
    Get { id: String },
    /// List organizations ordered by name.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Update fields of an organization.
    Update {
        id: String,
        #[arg(long)]
        json: Option<String>,
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        set: Vec<String>,
    },
    /// Delete an organization (its history is kept).
    Delete { id: String },
}
