use lather_core::Day;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct StatsResponse {
    total: usize,
    this_month: usize,
    last_year: usize,
    last_recorded: Option<Day>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let today = ctx.ledger.today();
    let all = ctx.ledger.all_dates();

    output(
        &StatsResponse {
            total: all.len(),
            this_month: ctx.ledger.count_in_month(today.year(), today.month())?,
            last_year: ctx.ledger.count_last_year(),
            last_recorded: all.last().copied(),
        },
        flags.format,
    )
}
