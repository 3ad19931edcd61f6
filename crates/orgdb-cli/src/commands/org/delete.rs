use orgdb_core::responses::DeleteResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.service.delete_organization(id, &ctx.actor).await?;
    output(
        &DeleteResponse {
            id: id.to_string(),
            deleted: true,
        },
        flags.format,
    )
}
