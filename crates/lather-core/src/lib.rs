//! # lather-core
//!
//! Core types, calendar primitives, and error types for Lather.
//!
//! This crate provides the foundational types shared across all Lather crates:
//! - [`Day`], the canonical `YYYY-MM-DD` ledger key
//! - Grid cells and calendar layout options
//! - The classifier [`Verdict`]
//! - A [`Clock`] abstraction so "today" can be pinned in tests
//! - Cross-cutting error types

pub mod calendar;
pub mod clock;
pub mod day;
pub mod errors;
pub mod verdict;

pub use calendar::{CalendarOptions, GridCell, GridSize};
pub use clock::{Clock, FixedClock, SystemClock};
pub use day::Day;
pub use errors::CoreError;
pub use verdict::Verdict;
