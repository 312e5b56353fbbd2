mod check;
mod count;
mod list;
mod record;
mod stats;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LogCommands;
use crate::context::AppContext;

/// Handle `lather log <subcommand>`.
pub fn handle(action: &LogCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        LogCommands::Record(args) => record::handle(args, ctx, flags),
        LogCommands::List => list::handle(ctx, flags),
        LogCommands::Check(args) => check::handle(args, ctx, flags),
        LogCommands::Count(args) => count::handle(args, ctx, flags),
        LogCommands::Stats => stats::handle(ctx, flags),
    }
}
