use orgdb_core::errors::CoreError;
use orgdb_db::updates::organization::OrganizationUpdate;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::field_input;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    json: Option<&str>,
    file: Option<&str>,
    set: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if json.is_none() && file.is_none() && set.is_empty() {
        return Err(CoreError::Validation(
            "At least one of --json, --file, or --set must be provided".into(),
        )
        .into());
    }

    let update = OrganizationUpdate::from_json(field_input(json, file, set)?)?;
    let org = ctx
        .service
        .update_organization(id, &update, &ctx.actor)
        .await?;
    output(&org, flags.format)
}
