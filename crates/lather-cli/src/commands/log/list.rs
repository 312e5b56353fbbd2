use lather_core::Day;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DayRow {
    date: Day,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = ctx
        .ledger
        .all_dates()
        .into_iter()
        .map(|date| DayRow { date })
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}
