//! The canonical ledger key.
//!
//! A [`Day`] is a calendar date with no time or zone attached. Timestamps are
//! normalized by taking their date in whatever zone they carry, so callers
//! pass `DateTime<Local>` to get the user's local calendar day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// Canonical string layout of a [`Day`].
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, rendered and stored as `YYYY-MM-DD`.
///
/// Two timestamps that fall on the same local date produce equal `Day`s;
/// this is the only equality the ledger uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

impl Day {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a day from year/month/day components.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDay`] if the components do not form a real date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, CoreError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidDay(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Normalize a timestamp to its calendar day in the timestamp's own zone.
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self(at.date_naive())
    }

    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for Day {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // chrono accepts unpadded fields; the canonical form is always 10 chars.
        if trimmed.len() != 10 {
            return Err(CoreError::InvalidDay(s.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, DAY_FORMAT)
            .map(Self)
            .map_err(|_| CoreError::InvalidDay(s.to_string()))
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn displays_zero_padded() {
        let day = Day::from_ymd(2024, 3, 1).unwrap();
        assert_eq!(day.to_string(), "2024-03-01");
    }

    #[rstest]
    #[case("2024-03-01")]
    #[case("1999-12-31")]
    #[case("2024-02-29")]
    fn parses_canonical_strings(#[case] raw: &str) {
        let day: Day = raw.parse().unwrap();
        assert_eq!(day.to_string(), raw);
    }

    #[rstest]
    #[case("2024-3-1")]
    #[case("2023-02-29")]
    #[case("03/01/2024")]
    #[case("")]
    #[case("2024-03-01T10:00:00")]
    fn rejects_non_canonical_strings(#[case] raw: &str) {
        assert!(matches!(raw.parse::<Day>(), Err(CoreError::InvalidDay(_))));
    }

    #[test]
    fn timestamps_on_same_local_date_are_equal() {
        let zone = FixedOffset::west_opt(5 * 3600).unwrap();
        let morning = zone.with_ymd_and_hms(2024, 3, 1, 0, 5, 0).unwrap();
        let night = zone.with_ymd_and_hms(2024, 3, 1, 23, 55, 0).unwrap();
        assert_eq!(Day::from_datetime(&morning), Day::from_datetime(&night));
    }

    #[test]
    fn normalization_uses_the_timestamps_zone() {
        // 02:00 UTC on the 2nd is still the 1st five hours west.
        let utc = Utc.with_ymd_and_hms(2024, 3, 2, 2, 0, 0).unwrap();
        let local = utc.with_timezone(&FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(Day::from_datetime(&utc).to_string(), "2024-03-02");
        assert_eq!(Day::from_datetime(&local).to_string(), "2024-03-01");
    }

    #[test]
    fn serializes_as_plain_string() {
        let day = Day::from_ymd(2024, 3, 1).unwrap();
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, "\"2024-03-01\"");
        let back: Day = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day);
    }
}
