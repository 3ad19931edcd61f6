use orgdb_core::responses::RollbackResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    version: u32,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (organization, entry) = ctx
        .service
        .rollback_organization(id, version, &ctx.actor)
        .await?;
    output(
        &RollbackResponse {
            organization,
            restored_version: version,
            new_version: entry.version,
        },
        flags.format,
    )
}
