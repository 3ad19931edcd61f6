use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output_columns;

const TABLE_COLUMNS: &[&str] = &["ID", "Name", "City", "Country", "Region", "Flagged for Review"];

pub async fn run(limit: Option<u32>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);
    let orgs = ctx.service.list_organizations(limit).await?;

    let rows = orgs
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    output_columns(&orgs, &rows, TABLE_COLUMNS, flags.format)
}
