use lather_core::Day;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LogCountArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CountResponse {
    year: i32,
    /// Absent when the whole year was counted.
    month: Option<u32>,
    count: usize,
}

/// `--year Y --month M` counts that month, `--year Y` alone the whole year,
/// and no flags the current month.
pub fn handle(args: &LogCountArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let today = ctx.ledger.today();

    let response = match (args.year, args.month) {
        (Some(year), None) => {
            let start = Day::from_ymd(year, 1, 1)?;
            let end = Day::from_ymd(year, 12, 31)?;
            CountResponse {
                year,
                month: None,
                count: ctx.ledger.count_in_range(start, end),
            }
        }
        (year, month) => {
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            CountResponse {
                year,
                month: Some(month),
                count: ctx.ledger.count_in_month(year, month)?,
            }
        }
    };

    output(&response, flags.format)
}
