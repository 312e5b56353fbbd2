use lather_core::Day;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LogCheckArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CheckResponse {
    date: Day,
    recorded: bool,
}

pub fn handle(args: &LogCheckArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(
        &CheckResponse {
            date: args.date,
            recorded: ctx.ledger.contains(args.date),
        },
        flags.format,
    )
}
