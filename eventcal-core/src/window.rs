//! Calendar-date comparisons for event windows.
//!
//! Events carry full instants, but visibility on the calendar is decided per
//! day: an event ending at 23:00 still covers that whole date.

use chrono::{DateTime, NaiveDate, Utc};

/// The UTC calendar date of an instant, with time-of-day dropped.
pub fn date_only(instant: &DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// True iff `probe` lies within `[date_only(start), date_only(end)]`, inclusive.
pub fn covers_date(start: &DateTime<Utc>, end: &DateTime<Utc>, probe: NaiveDate) -> bool {
    date_only(start) <= probe && probe <= date_only(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn time_of_day_is_ignored_at_both_ends() {
        let start = at(2024, 3, 1, 23, 59);
        let end = at(2024, 3, 3, 0, 1);

        assert!(covers_date(&start, &end, day(2024, 3, 1)));
        assert!(covers_date(&start, &end, day(2024, 3, 2)));
        assert!(covers_date(&start, &end, day(2024, 3, 3)));
    }

    #[test]
    fn days_outside_the_window_are_not_covered() {
        let start = at(2024, 3, 1, 10, 0);
        let end = at(2024, 3, 1, 11, 0);

        assert!(!covers_date(&start, &end, day(2024, 2, 29)));
        assert!(covers_date(&start, &end, day(2024, 3, 1)));
        assert!(!covers_date(&start, &end, day(2024, 3, 2)));
    }

    #[test]
    fn inverted_window_covers_nothing() {
        let start = at(2024, 3, 5, 0, 0);
        let end = at(2024, 3, 1, 0, 0);

        for d in 1..=5 {
            assert!(!covers_date(&start, &end, day(2024, 3, d)));
        }
    }

    #[test]
    fn date_only_uses_utc_calendar_date() {
        let instant = chrono::DateTime::parse_from_rfc3339("2024-03-01T22:00:00-05:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(date_only(&instant), day(2024, 3, 2));
    }
}
