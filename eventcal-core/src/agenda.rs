//! Per-day event aggregation.

use chrono::NaiveDate;

use crate::event::Event;
use crate::recurrence::occurs_on;

/// Events visible on `probe`, in the order they were supplied.
///
/// No cap is applied; truncating a busy day is up to the renderer.
pub fn events_on(events: &[Event], probe: NaiveDate) -> Vec<&Event> {
    events.iter().filter(|e| occurs_on(e, probe)).collect()
}
