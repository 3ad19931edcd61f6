use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Org { action } => commands::org::handle(&action, ctx, flags).await,
        Commands::History { action } => commands::history::handle(&action, ctx, flags).await,
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
        Commands::Export(args) => commands::export::handle(&args, ctx, flags).await,
        Commands::Stats => commands::stats::handle(ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
