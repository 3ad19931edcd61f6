use std::path::Path;

use orgdb_core::enums::ImportMode;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `orgdb import`.
pub async fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mode = parse_enum::<ImportMode>(&args.mode, "mode")?;
    let response = ctx
        .service
        .import_file(Path::new(&args.file), mode, &ctx.actor)
        .await?;
    output(&response, flags.format)
}
