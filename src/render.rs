//! Terminal rendering for eventcal types.
//!
//! Extension traits and helpers that turn core types into colored text with
//! owo_colors. Padding is applied to plain text before coloring so ANSI codes
//! never skew column widths.

use std::fmt::Display;

use eventcal_core::{Event, MonthCell, MonthGrid};
use owo_colors::OwoColorize;

/// Inner width of one day column in the month view
const CELL_WIDTH: usize = 14;

const LONG_TIME_FORMAT: &str = "%A, %B %-d, %Y %H:%M UTC";
const SHORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    /// One-line summary used by `list` and `day`
    fn render(&self) -> String {
        let id = format!("#{}", self.id);
        let window = format!(
            "{} → {}",
            self.start_date.format("%Y-%m-%d %H:%M"),
            self.end_date.format("%Y-%m-%d %H:%M")
        );

        let mut line = format!("{} {} {}", id.dimmed(), self.title.bold(), window.dimmed());
        if let Some(rule) = self.recurrence_summary() {
            line.push_str(&format!(" {}", format!("↻ {rule}").cyan()));
        }
        line
    }
}

/// Multi-line detail view used by `show`
pub fn render_event_detail(event: &Event) -> String {
    let mut lines = vec![
        format!("{}", event.title.bold()),
        field("ID", event.id),
        field("Start", event.start_date.format(LONG_TIME_FORMAT)),
        field("End", event.end_date.format(LONG_TIME_FORMAT)),
    ];

    if let Some(description) = &event.description {
        lines.push(field("Description", description));
    }

    let repeats = event.recurrence_summary().unwrap_or_else(|| "no".into());
    lines.push(field("Repeats", repeats));

    let created = event.created_at.format(SHORT_TIME_FORMAT);
    let updated = event.updated_at.format(SHORT_TIME_FORMAT);
    lines.push(field("Created", created.dimmed()));
    lines.push(field("Updated", updated.dimmed()));

    lines.join("\n")
}

fn field(label: &str, value: impl Display) -> String {
    format!("  {label:<12}{value}")
}

/// Render a month grid, showing at most `max_per_day` titles per cell.
pub fn render_month(grid: &MonthGrid, max_per_day: usize) -> String {
    let mut out = Vec::new();

    let title = format!("{} {}", grid.month_name, grid.year);
    out.push(format!("{}", title.bold()));

    let header: Vec<String> = WEEKDAY_HEADERS
        .iter()
        .map(|d| format!("{}", pad(d).dimmed()))
        .collect();
    out.push(header.join(" "));

    for week in grid.weeks() {
        let overflowing = week.iter().any(|c| hidden_count(c, max_per_day) > 0);
        let rows = 1 + max_per_day + usize::from(overflowing);

        for row in 0..rows {
            let line: Vec<String> = (0..7)
                .map(|col| render_cell_row(week.get(col), row, max_per_day))
                .collect();
            out.push(line.join(" ").trim_end().to_string());
        }
        out.push(String::new());
    }

    out.join("\n")
}

/// One text row of one cell. Row 0 is the day number, then titles, then "+N more".
fn render_cell_row(cell: Option<&MonthCell>, row: usize, max_per_day: usize) -> String {
    let Some(day) = cell.and_then(|c| c.as_day()) else {
        return pad("");
    };

    if row == 0 {
        let number = pad(&day.day.to_string());
        return if day.is_today {
            format!("{}", number.black().on_cyan())
        } else {
            number
        };
    }

    let index = row - 1;
    if index < max_per_day {
        return match day.events.get(index) {
            Some(event) => format!("{}", pad(&truncate(&event.title)).blue()),
            None => pad(""),
        };
    }

    match day.events.len().saturating_sub(max_per_day) {
        0 => pad(""),
        hidden => format!("{}", pad(&format!("+{hidden} more")).dimmed()),
    }
}

fn hidden_count(cell: &MonthCell, max_per_day: usize) -> usize {
    cell.as_day()
        .map(|d| d.events.len().saturating_sub(max_per_day))
        .unwrap_or(0)
}

fn pad(text: &str) -> String {
    format!("{:<width$}", text, width = CELL_WIDTH)
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= CELL_WIDTH {
        return text.to_string();
    }
    let mut short: String = text.chars().take(CELL_WIDTH - 1).collect();
    short.push('…');
    short
}
