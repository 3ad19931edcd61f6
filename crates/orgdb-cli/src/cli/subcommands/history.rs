use clap::Subcommand;

/// History commands.
#[derive(Clone, Debug, Subcommand)]
pub enum HistoryCommands {
    /// All versions of a record, newest first.
    List { id: String },
    /// One version of a record.
    Get { id: String, version: u32 },
    /// Highest version number of a record (0 if none).
    Latest { id: String },
    /// Restore a past version as a new version.
    Rollback { id: String, version: u32 },
}
