use orgdb_core::entities::OrganizationFields;
use orgdb_core::errors::CoreError;
use orgdb_db::updates::organization::OrganizationUpdate;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::field_input;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: Option<&str>,
    json: Option<&str>,
    file: Option<&str>,
    set: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut input = field_input(json, file, set)?;
    if let (Some(name), Value::Object(map)) = (name, &mut input) {
        map.insert("Name".into(), Value::String(name.to_string()));
    }

    // Same key rules as an update: no audit fields, no unknown keys.
    let initial = OrganizationUpdate::from_json(input)?;
    let fields = initial.apply_to(&OrganizationFields::default())?;
    if fields.name.trim().is_empty() {
        return Err(CoreError::Validation("an organization needs a Name".into()).into());
    }

    let org = ctx.service.create_organization(fields, &ctx.actor).await?;
    output(&org, flags.format)
}
