//! Month grid layout.
//!
//! A grid is a run of blank cells (one per weekday before the 1st, weeks start
//! on Sunday) followed by one cell per day carrying that day's events.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::agenda::events_on;
use crate::error::{EventcalError, EventcalResult};
use crate::event::Event;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A validated (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// `month` is 1-based.
    pub fn new(year: i32, month: u32) -> EventcalResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| CalendarMonth { first })
            .ok_or(EventcalError::InvalidMonth { year, month })
    }

    /// The month `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        CalendarMonth {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.first.month0() as usize]
    }

    /// None only at the edge of the representable calendar.
    pub fn prev(&self) -> Option<Self> {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| CalendarMonth { first })
    }

    pub fn next(&self) -> Option<Self> {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| CalendarMonth { first })
    }

    /// Blank cells before the 1st (Sunday = 0).
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// Number of days, taken as the day before the 1st of the following month.
    pub fn days(&self) -> u32 {
        self.next()
            .and_then(|next| next.first.pred_opt())
            .map(|last| last.day())
            // the last representable month is a December
            .unwrap_or(31)
    }

    /// Every date in the month, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take(self.days() as usize)
    }
}

/// Days in `month` of `year`, or None if the pair is not a valid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    CalendarMonth::new(year, month).ok().map(|m| m.days())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell<'a> {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    pub events: Vec<&'a Event>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MonthCell<'a> {
    /// Padding before the 1st
    Blank,
    Day(DayCell<'a>),
}

impl<'a> MonthCell<'a> {
    pub fn as_day(&self) -> Option<&DayCell<'a>> {
        match self {
            MonthCell::Blank => None,
            MonthCell::Day(cell) => Some(cell),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid<'a> {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub leading_blanks: u32,
    pub days_in_month: u32,
    pub cells: Vec<MonthCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// Cells grouped by calendar row; the last row may be short.
    pub fn weeks(&self) -> impl Iterator<Item = &[MonthCell<'a>]> {
        self.cells.chunks(7)
    }
}

/// Lay out `month`, attaching the events visible on each day.
pub fn build_month<'a>(
    month: CalendarMonth,
    events: &'a [Event],
    today: NaiveDate,
) -> MonthGrid<'a> {
    let leading_blanks = month.leading_blanks();
    let days_in_month = month.days();

    let mut cells = Vec::with_capacity((leading_blanks + days_in_month) as usize);
    cells.extend((0..leading_blanks).map(|_| MonthCell::Blank));
    cells.extend(month.dates().map(|date| {
        MonthCell::Day(DayCell {
            day: date.day(),
            date,
            is_today: date == today,
            events: events_on(events, date),
        })
    }));

    MonthGrid {
        year: month.year(),
        month: month.month(),
        month_name: month.name(),
        leading_blanks,
        days_in_month,
        cells,
    }
}
