//! Source of "today".
//!
//! The ledger and classifier never call `Local::now()` directly; they ask a
//! [`Clock`], which tests replace with a [`FixedClock`].

use chrono::Local;

use crate::day::Day;

pub trait Clock: Send + Sync {
    /// The current day in the user's local calendar.
    fn today(&self) -> Day;
}

/// Wall clock in the process's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Day {
        Day::from_datetime(&Local::now())
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Day);

impl Clock for FixedClock {
    fn today(&self) -> Day {
        self.0
    }
}
