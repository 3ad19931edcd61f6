use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `orgdb stats`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = ctx.service.organization_stats().await?;
    output(&stats, flags.format)
}
