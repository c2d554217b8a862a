//! Recurrence evaluation.
//!
//! Decides whether an event is visible on a given calendar date. Occurrences
//! are never materialized; every probe is answered from the stored rule.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::event::{Event, Frequency};
use crate::window::{covers_date, date_only};

/// The rule an event follows, derived from its recurrence fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence<'a> {
    /// Not recurring: visible on every date of its window
    Once,
    Daily,
    /// Weekly on the listed abbreviations, or on the start weekday when empty
    Weekly(&'a [String]),
    /// Same day-of-month as the start date
    Monthly,
    /// Recurring with a missing or unknown frequency.
    /// Treated like `Once`.
    Fallback,
}

impl<'a> Recurrence<'a> {
    pub fn of(event: &'a Event) -> Self {
        if !event.is_recurring {
            return Recurrence::Once;
        }

        match event.frequency {
            Some(Frequency::Daily) => Recurrence::Daily,
            Some(Frequency::Weekly) => Recurrence::Weekly(&event.days_of_week),
            Some(Frequency::Monthly) => Recurrence::Monthly,
            Some(Frequency::Unrecognized) | None => Recurrence::Fallback,
        }
    }
}

/// Three-letter abbreviation used in `days_of_week`
pub fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

/// Whether `event` is visible on `probe`.
///
/// Recurrence never extends past the stored window, so every rule first
/// requires `probe` to fall inside `[start, end]` by calendar date.
pub fn occurs_on(event: &Event, probe: NaiveDate) -> bool {
    if !covers_date(&event.start_date, &event.end_date, probe) {
        return false;
    }

    let start = date_only(&event.start_date);

    match Recurrence::of(event) {
        Recurrence::Once | Recurrence::Fallback | Recurrence::Daily => true,
        Recurrence::Weekly([]) => probe.weekday() == start.weekday(),
        Recurrence::Weekly(days) => {
            let abbrev = weekday_abbrev(probe.weekday());
            days.iter().any(|d| d == abbrev)
        }
        // No clamping: a 31st-anchored event skips shorter months.
        Recurrence::Monthly => probe.day() == start.day(),
    }
}
