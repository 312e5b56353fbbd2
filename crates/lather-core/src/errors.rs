//! Cross-cutting error types for Lather.
//!
//! Domain-specific errors (e.g., `StorageError`, `ClassifierError`) are defined
//! in their respective crates. They converge in `lather-cli` via `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Lather crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A string could not be parsed as a canonical `YYYY-MM-DD` day.
    #[error("invalid day '{0}': expected YYYY-MM-DD")]
    InvalidDay(String),

    /// A month number outside `1..=12`, or a year chrono cannot represent.
    #[error("invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    /// A weekday name that is not recognized.
    #[error("invalid weekday '{0}'")]
    InvalidWeekday(String),

    /// A grid height other than five or six weeks.
    #[error("invalid grid size: {0} weeks (expected 5 or 6)")]
    InvalidGridSize(u32),
}
