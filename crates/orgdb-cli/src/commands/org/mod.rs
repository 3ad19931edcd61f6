mod create;
mod delete;
mod get;
mod list;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrgCommands;
use crate::context::AppContext;

/// Handle `orgdb org`.
pub async fn handle(
    action: &OrgCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OrgCommands::Create {
            name,
            json,
            file,
            set,
        } => {
            create::run(
                name.as_deref(),
                json.as_deref(),
                file.as_deref(),
                set,
                ctx,
                flags,
            )
            .await
        }
        OrgCommands::Get { id } => get::run(id, ctx, flags).await,
        OrgCommands::List { limit } => list::run(*limit, ctx, flags).await,
        OrgCommands::Update {
            id,
            json,
            file,
            set,
        } => update::run(id, json.as_deref(), file.as_deref(), set, ctx, flags).await,
        OrgCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}
