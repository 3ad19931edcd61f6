use std::path::Path;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `orgdb export`.
pub async fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ctx
        .service
        .export_to_files(Path::new(&args.file), args.history.as_deref().map(Path::new))
        .await?;
    output(&response, flags.format)
}
