mod get;
mod latest;
mod list;
mod rollback;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HistoryCommands;
use crate::context::AppContext;

/// Handle `orgdb history`.
pub async fn handle(
    action: &HistoryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        HistoryCommands::List { id } => list::run(id, ctx, flags).await,
        HistoryCommands::Get { id, version } => get::run(id, *version, ctx, flags).await,
        HistoryCommands::Latest { id } => latest::run(id, ctx, flags).await,
        HistoryCommands::Rollback { id, version } => {
            rollback::run(id, *version, ctx, flags).await
        }
    }
}
