use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `lather` binary.
#[derive(Debug, Parser)]
#[command(name = "lather", version, about = "Lather - shower streaks and photo check-ins")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data directory (overrides `storage.data_dir`)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            data_dir: self.data_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::NaiveDate;
    use clap::{CommandFactory, Parser};

    use super::subcommands::{AuthCommands, CalendarCommands, LogCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["lather", "--format", "json", "--verbose", "log", "stats"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Log {
                action: LogCommands::Stats
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["lather", "calendar", "year", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Calendar {
                action: CalendarCommands::Year
            }
        ));
    }

    #[test]
    fn default_format_is_table() {
        let cli = Cli::try_parse_from(["lather", "log", "list"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["lather", "--format", "xml", "log", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn record_date_is_parsed_strictly() {
        let cli = Cli::try_parse_from(["lather", "log", "record", "--date", "2024-02-29"])
            .expect("cli should parse");
        let Commands::Log {
            action: LogCommands::Record(args),
        } = cli.command
        else {
            panic!("expected log record");
        };
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(args.date.map(|d| d.date()), Some(expected));

        assert!(Cli::try_parse_from(["lather", "log", "record", "--date", "2023-02-29"]).is_err());
        assert!(Cli::try_parse_from(["lather", "log", "record", "--date", "2024-2-9"]).is_err());
    }

    #[test]
    fn check_requires_date() {
        assert!(Cli::try_parse_from(["lather", "log", "check"]).is_err());
    }

    #[test]
    fn count_month_requires_year() {
        assert!(Cli::try_parse_from(["lather", "log", "count", "--month", "3"]).is_err());
        assert!(Cli::try_parse_from(["lather", "log", "count", "--year", "2024", "--month", "13"]).is_err());
        let cli = Cli::try_parse_from(["lather", "log", "count", "--year", "2024", "--month", "3"])
            .expect("cli should parse");
        let Commands::Log {
            action: LogCommands::Count(args),
        } = cli.command
        else {
            panic!("expected log count");
        };
        assert_eq!((args.year, args.month), (Some(2024), Some(3)));
    }

    #[test]
    fn auth_signup_takes_email_and_password() {
        let cli = Cli::try_parse_from([
            "lather",
            "auth",
            "signup",
            "--email",
            "ada@example.com",
            "--password",
            "pw",
        ])
        .expect("cli should parse");
        let Commands::Auth {
            action: AuthCommands::Signup(args),
        } = cli.command
        else {
            panic!("expected auth signup");
        };
        assert_eq!(args.email, "ada@example.com");
        assert_eq!(args.password, "pw");
    }

    #[test]
    fn classify_takes_photo_path() {
        let cli = Cli::try_parse_from(["lather", "classify", "shower.jpg"]).expect("cli should parse");
        let Commands::Classify(args) = cli.command else {
            panic!("expected classify");
        };
        assert_eq!(args.photo, Path::new("shower.jpg"));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["lather", "--data-dir", "/tmp/lather", "log", "list"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.data_dir.as_deref(), Some(Path::new("/tmp/lather")));
    }
}
