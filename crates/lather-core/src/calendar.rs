//! Calendar layout primitives shared by the ledger and its renderers.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::errors::CoreError;

/// One slot of a rendered calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridCell {
    /// Padding outside the rendered period.
    Empty,
    Day {
        date: Day,
        is_today: bool,
        has_event: bool,
    },
}

impl GridCell {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn date(&self) -> Option<Day> {
        match self {
            Self::Empty => None,
            Self::Day { date, .. } => Some(*date),
        }
    }

    #[must_use]
    pub const fn has_event(&self) -> bool {
        matches!(self, Self::Day { has_event: true, .. })
    }
}

/// Fixed height of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridSize {
    /// 35 cells. Months that need a sixth row lose their trailing days.
    FiveWeeks,
    /// 42 cells. Every month fits.
    SixWeeks,
}

impl GridSize {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidGridSize`] for anything but 5 or 6.
    pub fn from_weeks(weeks: u32) -> Result<Self, CoreError> {
        match weeks {
            5 => Ok(Self::FiveWeeks),
            6 => Ok(Self::SixWeeks),
            other => Err(CoreError::InvalidGridSize(other)),
        }
    }

    #[must_use]
    pub const fn weeks(self) -> usize {
        match self {
            Self::FiveWeeks => 5,
            Self::SixWeeks => 6,
        }
    }

    #[must_use]
    pub const fn cells(self) -> usize {
        self.weeks() * 7
    }
}

/// How calendars are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarOptions {
    /// Weekday shown in the leftmost column.
    pub first_weekday: Weekday,
    pub grid_size: GridSize,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Sun,
            grid_size: GridSize::SixWeeks,
        }
    }
}

impl CalendarOptions {
    /// Number of padding cells before `date` so it lands in its weekday column.
    #[must_use]
    pub fn leading_padding(&self, date: NaiveDate) -> usize {
        let column = date.weekday().num_days_from_monday();
        let first = self.first_weekday.num_days_from_monday();
        ((column + 7 - first) % 7) as usize
    }
}

/// Parse a weekday name or common abbreviation, case-insensitively.
///
/// # Errors
///
/// Returns [`CoreError::InvalidWeekday`] for unrecognized names.
pub fn parse_weekday(value: &str) -> Result<Weekday, CoreError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "sun" | "sunday" => Ok(Weekday::Sun),
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thurs" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        _ => Err(CoreError::InvalidWeekday(value.to_string())),
    }
}

/// First day of `year`-`month`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidMonth`] if the month is outside `1..=12`.
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CoreError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CoreError::InvalidMonth { year, month })
}

/// Number of days in `year`-`month`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidMonth`] if the month is outside `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CoreError> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    let days = next.signed_duration_since(first).num_days();
    u32::try_from(days).map_err(|_| CoreError::InvalidMonth { year, month })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(2024, 2, 29)]
    #[case(2023, 2, 28)]
    #[case(2024, 4, 30)]
    #[case(2024, 12, 31)]
    #[case(1900, 2, 28)]
    #[case(2000, 2, 29)]
    fn month_lengths(#[case] year: i32, #[case] month: u32, #[case] expected: u32) {
        assert_eq!(days_in_month(year, month).unwrap(), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn invalid_months_are_rejected(#[case] month: u32) {
        assert_eq!(
            days_in_month(2024, month),
            Err(CoreError::InvalidMonth { year: 2024, month })
        );
    }

    #[test]
    fn leading_padding_relative_to_first_weekday() {
        // 2024-03-01 is a Friday.
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let sunday_first = CalendarOptions::default();
        let monday_first = CalendarOptions {
            first_weekday: Weekday::Mon,
            ..CalendarOptions::default()
        };
        let friday_first = CalendarOptions {
            first_weekday: Weekday::Fri,
            ..CalendarOptions::default()
        };
        assert_eq!(sunday_first.leading_padding(date), 5);
        assert_eq!(monday_first.leading_padding(date), 4);
        assert_eq!(friday_first.leading_padding(date), 0);
    }

    #[rstest]
    #[case("Sunday", Weekday::Sun)]
    #[case("mon", Weekday::Mon)]
    #[case(" THURS ", Weekday::Thu)]
    #[case("sat", Weekday::Sat)]
    fn weekday_names(#[case] raw: &str, #[case] expected: Weekday) {
        assert_eq!(parse_weekday(raw).unwrap(), expected);
    }

    #[test]
    fn unknown_weekday_is_an_error() {
        assert!(matches!(
            parse_weekday("someday"),
            Err(CoreError::InvalidWeekday(_))
        ));
    }

    #[test]
    fn grid_sizes() {
        assert_eq!(GridSize::from_weeks(5).unwrap().cells(), 35);
        assert_eq!(GridSize::from_weeks(6).unwrap().cells(), 42);
        assert_eq!(GridSize::from_weeks(4), Err(CoreError::InvalidGridSize(4)));
    }

    #[test]
    fn grid_cell_serializes_with_kind_tag() {
        let cell = GridCell::Day {
            date: Day::from_ymd(2024, 3, 1).unwrap(),
            is_today: true,
            has_event: false,
        };
        let json = serde_json::to_value(cell).unwrap();
        assert_eq!(json["kind"], "day");
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["is_today"], true);

        let empty = serde_json::to_value(GridCell::Empty).unwrap();
        assert_eq!(empty["kind"], "empty");
    }
}
