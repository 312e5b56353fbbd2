use clap::{Args, Subcommand};
use lather_core::Day;

/// Calendar views.
#[derive(Clone, Debug, Subcommand)]
pub enum CalendarCommands {
    /// Month grid around an anchor day (today by default).
    Month(CalendarMonthArgs),
    /// One-year heatmap ending today.
    Year,
}

#[derive(Clone, Debug, Args)]
pub struct CalendarMonthArgs {
    /// Any day in the month to show (YYYY-MM-DD).
    #[arg(long)]
    pub anchor: Option<Day>,
}
