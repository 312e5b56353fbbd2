use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, CalendarCommands, LogCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Local account and API key management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Shower ledger.
    Log {
        #[command(subcommand)]
        action: LogCommands,
    },
    /// Calendar views of the ledger.
    Calendar {
        #[command(subcommand)]
        action: CalendarCommands,
    },
    /// Check a photo and record today if it shows a shower.
    Classify(ClassifyArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    /// Photo file (JPEG, PNG, GIF, WebP or BMP).
    pub photo: PathBuf,
}
