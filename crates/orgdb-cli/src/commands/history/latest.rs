use orgdb_core::responses::LatestVersionResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let latest_version = ctx.service.get_latest_version(id).await;
    output(
        &LatestVersionResponse {
            organization_id: id.to_string(),
            latest_version,
        },
        flags.format,
    )
}
