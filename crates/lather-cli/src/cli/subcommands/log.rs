use clap::{Args, Subcommand};
use lather_core::Day;

/// Shower ledger commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LogCommands {
    /// Record a shower (today unless --date is given).
    Record(LogRecordArgs),
    /// List every recorded day.
    List,
    /// Check whether a day is recorded.
    Check(LogCheckArgs),
    /// Count recorded days in a month (current month by default).
    Count(LogCountArgs),
    /// Totals: all time, this month, last year.
    Stats,
}

#[derive(Clone, Debug, Args)]
pub struct LogRecordArgs {
    /// Day to record (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<Day>,
}

#[derive(Clone, Debug, Args)]
pub struct LogCheckArgs {
    /// Day to check (YYYY-MM-DD).
    #[arg(long)]
    pub date: Day,
}

#[derive(Clone, Debug, Args)]
pub struct LogCountArgs {
    /// Year to count in.
    #[arg(long)]
    pub year: Option<i32>,
    /// Month to count in (1-12); needs --year.
    #[arg(long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}
