//! Month grids and the year heatmap as terminal text.

use chrono::{Datelike, NaiveDate, Weekday};
use lather_core::{Day, GridCell};
use serde::Serialize;

use crate::cli::OutputFormat;

#[derive(Debug, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub first_weekday: Weekday,
    pub recorded: usize,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Serialize)]
pub struct YearView {
    pub start: Day,
    pub end: Day,
    pub first_weekday: Weekday,
    pub recorded: usize,
    pub cells: Vec<GridCell>,
}

/// Print a month view: a weekday grid for `table`, serialized otherwise.
pub fn output_month(view: &MonthView, format: OutputFormat, color: bool) -> anyhow::Result<()> {
    if format == OutputFormat::Table {
        println!("{}", render_month(view, color));
        return Ok(());
    }
    super::output(view, format)
}

/// Print a year view: a weekday-by-week heatmap for `table`, serialized otherwise.
pub fn output_year(view: &YearView, format: OutputFormat, color: bool) -> anyhow::Result<()> {
    if format == OutputFormat::Table {
        println!("{}", render_year(view, color));
        return Ok(());
    }
    super::output(view, format)
}

fn weekday_columns(first: Weekday) -> impl Iterator<Item = Weekday> {
    std::iter::successors(Some(first), |day| Some(day.succ())).take(7)
}

pub fn render_month(view: &MonthView, color: bool) -> String {
    let title = NaiveDate::from_ymd_opt(view.year, view.month, 1).map_or_else(
        || format!("{}-{:02}", view.year, view.month),
        |first| first.format("%B %Y").to_string(),
    );

    let mut lines = vec![
        format!("{title} ({} recorded)", view.recorded),
        weekday_columns(view.first_weekday)
            .map(|day| format!(" {day} "))
            .collect::<Vec<_>>()
            .join(" "),
    ];

    for week in view.cells.chunks(7) {
        let line = week
            .iter()
            .map(|cell| month_cell(cell, color))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn month_cell(cell: &GridCell, color: bool) -> String {
    let GridCell::Day {
        date,
        is_today,
        has_event,
    } = *cell
    else {
        return " ".repeat(5);
    };

    let (open, close) = if is_today { ('[', ']') } else { (' ', ' ') };
    let mark = if has_event { '*' } else { ' ' };
    let day = date.date().day();
    if color && has_event {
        format!("{open}\u{1b}[32m{day:>2}{mark}\u{1b}[0m{close}")
    } else {
        format!("{open}{day:>2}{mark}{close}")
    }
}

pub fn render_year(view: &YearView, color: bool) -> String {
    let weeks = view.cells.len().div_ceil(7);
    let mut lines = vec![format!("{} to {}", view.start, view.end)];

    for (row, weekday) in weekday_columns(view.first_weekday).enumerate() {
        let mut line = format!("{weekday} ");
        for week in 0..weeks {
            let glyph = match view.cells.get(week * 7 + row) {
                Some(cell) if cell.has_event() => {
                    if color {
                        "\u{1b}[32m#\u{1b}[0m"
                    } else {
                        "#"
                    }
                }
                Some(GridCell::Day { .. }) => ".",
                _ => " ",
            };
            line.push_str(glyph);
        }
        lines.push(line.trim_end().to_string());
    }

    lines.push(format!("{} showers in the last year", view.recorded));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn day(text: &str) -> Day {
        text.parse().unwrap()
    }

    fn cell(text: &str, is_today: bool, has_event: bool) -> GridCell {
        GridCell::Day {
            date: day(text),
            is_today,
            has_event,
        }
    }

    #[test]
    fn month_grid_text() {
        // February 2026 starts on a Sunday.
        let mut cells = (1..=28)
            .map(|d| cell(&format!("2026-02-{d:02}"), d == 10, d == 3 || d == 10))
            .collect::<Vec<_>>();
        cells.resize(35, GridCell::Empty);

        let view = MonthView {
            year: 2026,
            month: 2,
            first_weekday: Weekday::Sun,
            recorded: 2,
            cells,
        };
        let text = render_month(&view, false);
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "February 2026 (2 recorded)");
        assert_eq!(lines[1], " Sun   Mon   Tue   Wed   Thu   Fri   Sat ");
        assert_eq!(lines[2], "  1     2     3*    4     5     6     7");
        assert_eq!(lines[3], "  8     9   [10*]  11    12    13    14");
        // The fifth week is all padding but still occupies a row.
        assert_eq!(text.split('\n').count(), 7);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn month_grid_leading_padding() {
        let mut cells = vec![GridCell::Empty; 3];
        cells.push(cell("2024-05-01", false, false));
        let view = MonthView {
            year: 2024,
            month: 5,
            first_weekday: Weekday::Sun,
            recorded: 0,
            cells,
        };
        let text = render_month(&view, false);
        assert_eq!(text.lines().nth(2), Some("                    1"));
    }

    #[test]
    fn weekday_header_follows_first_weekday() {
        let view = MonthView {
            year: 2024,
            month: 1,
            first_weekday: Weekday::Mon,
            recorded: 0,
            cells: Vec::new(),
        };
        let text = render_month(&view, false);
        assert!(text.lines().nth(1).is_some_and(|line| line.starts_with(" Mon")));
        assert!(text.lines().nth(1).is_some_and(|line| line.ends_with(" Sun ")));
    }

    #[test]
    fn year_heatmap_text() {
        let mut cells = vec![GridCell::Empty; 2];
        cells.extend([
            cell("2024-01-02", false, true),
            cell("2024-01-03", false, false),
            cell("2024-01-04", false, false),
            cell("2024-01-05", false, false),
            cell("2024-01-06", false, false),
            cell("2024-01-07", false, true),
            cell("2024-01-08", true, false),
        ]);
        cells.resize(14, GridCell::Empty);

        let view = YearView {
            start: day("2024-01-02"),
            end: day("2024-01-08"),
            first_weekday: Weekday::Sun,
            recorded: 2,
            cells,
        };
        let text = render_year(&view, false);
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "2024-01-02 to 2024-01-08");
        assert_eq!(lines[1], "Sun  #");
        assert_eq!(lines[2], "Mon  .");
        assert_eq!(lines[3], "Tue #");
        assert_eq!(lines[7], "Sat .");
        assert_eq!(lines[8], "2 showers in the last year");
    }
}
