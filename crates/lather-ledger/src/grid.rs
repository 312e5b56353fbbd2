//! Calendar layouts derived from the ledger.
//!
//! Both layouts are pure functions of "today", the layout options and a
//! membership predicate, so they can be tested without a store.

use chrono::{Datelike, Days, Months};
use lather_core::{CalendarOptions, Day, GridCell};

/// Lay out the month containing `anchor` as a fixed-size grid.
///
/// Leading `Empty` cells align day 1 to its weekday column, one `Day` cell
/// follows per day of the month, and trailing `Empty` cells fill the grid to
/// `options.grid_size`. A five-week grid drops trailing days that do not fit.
pub fn month_grid(
    anchor: Day,
    today: Day,
    options: CalendarOptions,
    has_event: impl Fn(Day) -> bool,
) -> Vec<GridCell> {
    let anchor = anchor.date();
    let first = anchor - Days::new(u64::from(anchor.day0()));
    let size = options.grid_size.cells();

    let mut cells = Vec::with_capacity(size.max(37));
    cells.resize(options.leading_padding(first), GridCell::Empty);
    cells.extend(
        first
            .iter_days()
            .take_while(|date| date.month() == first.month())
            .map(|date| day_cell(Day::new(date), today, &has_event)),
    );

    if cells.len() > size {
        tracing::debug!(
            month = %first.format("%Y-%m"),
            dropped = cells.len() - size,
            "month grid truncated to fixed size"
        );
        cells.truncate(size);
    }
    cells.resize(size, GridCell::Empty);
    cells
}

/// Lay out every day from one year before `today` through `today`, in week
/// columns: leading padding to the first weekday, trailing padding to a
/// whole week.
pub fn year_heatmap(
    today: Day,
    options: CalendarOptions,
    has_event: impl Fn(Day) -> bool,
) -> Vec<GridCell> {
    let start = year_before(today).date();

    let mut cells = Vec::with_capacity(378);
    cells.resize(options.leading_padding(start), GridCell::Empty);
    cells.extend(
        start
            .iter_days()
            .take_while(|date| *date <= today.date())
            .map(|date| day_cell(Day::new(date), today, &has_event)),
    );
    let padded = cells.len().div_ceil(7) * 7;
    cells.resize(padded, GridCell::Empty);
    cells
}

/// The same calendar day one year earlier. Feb 29 maps to Feb 28.
#[must_use]
pub fn year_before(day: Day) -> Day {
    day.date()
        .checked_sub_months(Months::new(12))
        .map_or(day, Day::new)
}

fn day_cell(date: Day, today: Day, has_event: &impl Fn(Day) -> bool) -> GridCell {
    GridCell::Day {
        date,
        is_today: date == today,
        has_event: has_event(date),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use lather_core::GridSize;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn day(raw: &str) -> Day {
        raw.parse().unwrap()
    }

    fn leading_empties(cells: &[GridCell]) -> usize {
        cells.iter().take_while(|c| c.is_empty()).count()
    }

    fn day_cells(cells: &[GridCell]) -> usize {
        cells.iter().filter(|c| !c.is_empty()).count()
    }

    const SIX: CalendarOptions = CalendarOptions {
        first_weekday: Weekday::Sun,
        grid_size: GridSize::SixWeeks,
    };

    const FIVE: CalendarOptions = CalendarOptions {
        first_weekday: Weekday::Sun,
        grid_size: GridSize::FiveWeeks,
    };

    #[rstest]
    #[case("2024-03-17", 5, 31)] // Friday start
    #[case("2024-02-10", 4, 29)] // leap February, Thursday start
    #[case("2024-09-30", 0, 30)] // Sunday start
    #[case("2015-02-01", 0, 28)] // four exact rows
    #[case("2023-12-31", 5, 31)]
    fn six_week_grid_holds_every_day(
        #[case] anchor: &str,
        #[case] lead: usize,
        #[case] days: usize,
    ) {
        let cells = month_grid(day(anchor), day("2000-01-01"), SIX, |_| false);
        assert_eq!(cells.len(), 42);
        assert_eq!(leading_empties(&cells), lead);
        assert_eq!(day_cells(&cells), days);
    }

    #[test]
    fn first_cell_is_day_one_when_month_starts_on_first_weekday() {
        let cells = month_grid(day("2024-09-15"), day("2000-01-01"), SIX, |_| false);
        assert_eq!(cells[0].date(), Some(day("2024-09-01")));
    }

    #[test]
    fn first_weekday_shifts_padding() {
        let monday = CalendarOptions {
            first_weekday: Weekday::Mon,
            ..SIX
        };
        // 2024-09-01 is a Sunday: last column when weeks start on Monday.
        let cells = month_grid(day("2024-09-01"), day("2000-01-01"), monday, |_| false);
        assert_eq!(leading_empties(&cells), 6);
        assert_eq!(cells[6].date(), Some(day("2024-09-01")));
    }

    #[test]
    fn five_week_grid_truncates_overflowing_days() {
        // March 2024 needs 5 leading pads + 31 days = 36 cells.
        let cells = month_grid(day("2024-03-01"), day("2000-01-01"), FIVE, |_| false);
        assert_eq!(cells.len(), 35);
        assert_eq!(day_cells(&cells), 30);
        assert_eq!(cells[34].date(), Some(day("2024-03-30")));
    }

    #[test]
    fn five_week_grid_pads_short_months() {
        let cells = month_grid(day("2015-02-14"), day("2000-01-01"), FIVE, |_| false);
        assert_eq!(cells.len(), 35);
        assert_eq!(day_cells(&cells), 28);
        assert!(cells[28..].iter().all(GridCell::is_empty));
    }

    #[test]
    fn flags_today_and_events() {
        let events = [day("2024-03-01"), day("2024-03-05")];
        let cells = month_grid(day("2024-03-20"), day("2024-03-05"), SIX, |d| {
            events.contains(&d)
        });

        let today: Vec<_> = cells
            .iter()
            .filter(|c| matches!(c, GridCell::Day { is_today: true, .. }))
            .filter_map(GridCell::date)
            .collect();
        assert_eq!(today, vec![day("2024-03-05")]);

        let with_events: Vec<_> = cells
            .iter()
            .filter(|c| c.has_event())
            .filter_map(GridCell::date)
            .collect();
        assert_eq!(with_events, vec![day("2024-03-01"), day("2024-03-05")]);
    }

    #[test]
    fn heatmap_covers_one_year_in_whole_weeks() {
        // 2023-03-15 is a Wednesday; 2023-03-15..=2024-03-15 spans Feb 29.
        let cells = year_heatmap(day("2024-03-15"), SIX, |_| false);
        assert_eq!(cells.len() % 7, 0);
        assert_eq!(cells.len(), 371);
        assert_eq!(leading_empties(&cells), 3);
        assert_eq!(day_cells(&cells), 367);
        assert_eq!(cells[3].date(), Some(day("2023-03-15")));
    }

    #[test]
    fn heatmap_marks_today_last() {
        let cells = year_heatmap(day("2024-03-15"), SIX, |_| false);
        let last = cells.iter().rev().find(|c| !c.is_empty()).unwrap();
        assert!(matches!(last, GridCell::Day { is_today: true, .. }));
    }

    #[test]
    fn year_before_clamps_leap_day() {
        assert_eq!(year_before(day("2024-02-29")), day("2023-02-28"));
        assert_eq!(year_before(day("2024-03-15")), day("2023-03-15"));
    }
}
