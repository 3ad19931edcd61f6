use orgdb_db::error::DatabaseError;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    version: u32,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entry = ctx
        .service
        .get_version(id, version)
        .await?
        .ok_or_else(|| DatabaseError::not_found("version", format!("{id}@{version}")))?;
    output(&entry, flags.format)
}
