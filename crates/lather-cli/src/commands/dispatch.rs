use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags),
        Commands::Log { action } => commands::log::handle(&action, ctx, flags),
        Commands::Calendar { action } => commands::calendar::handle(&action, ctx, flags),
        Commands::Classify(args) => commands::classify::handle(&args, ctx, flags).await,
    }
}
