use anyhow::Context;
use lather_core::Day;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LogRecordArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct RecordResponse {
    date: Day,
    newly_recorded: bool,
    total: usize,
}

pub fn handle(args: &LogRecordArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let date = args.date.unwrap_or_else(|| ctx.ledger.today());
    let newly_recorded = ctx
        .ledger
        .record(date)
        .with_context(|| format!("failed to record {date}"))?;

    output(
        &RecordResponse {
            date,
            newly_recorded,
            total: ctx.ledger.len(),
        },
        flags.format,
    )
}
