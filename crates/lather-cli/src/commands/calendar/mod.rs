use chrono::Datelike;
use lather_ledger::grid::year_before;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{CalendarCommands, CalendarMonthArgs};
use crate::context::AppContext;
use crate::output::calendar::{MonthView, YearView, output_month, output_year};
use crate::ui;

/// Handle `lather calendar <subcommand>`.
pub fn handle(action: &CalendarCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        CalendarCommands::Month(args) => month(args, ctx, flags),
        CalendarCommands::Year => year(ctx, flags),
    }
}

fn month(args: &CalendarMonthArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let anchor = args.anchor.unwrap_or_else(|| ctx.ledger.today());
    let date = anchor.date();

    let view = MonthView {
        year: date.year(),
        month: date.month(),
        first_weekday: ctx.ledger.options().first_weekday,
        recorded: ctx.ledger.count_in_month(date.year(), date.month())?,
        cells: ctx.ledger.build_month_grid(anchor),
    };
    output_month(&view, flags.format, ui::prefs().color)
}

fn year(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let today = ctx.ledger.today();

    let view = YearView {
        start: year_before(today),
        end: today,
        first_weekday: ctx.ledger.options().first_weekday,
        recorded: ctx.ledger.count_last_year(),
        cells: ctx.ledger.build_year_heatmap(),
    };
    output_year(&view, flags.format, ui::prefs().color)
}
