//! Core types for eventcal.
//!
//! This crate provides everything the CLI and server share:
//! - `Event` and the draft type used to create/update events
//! - date-window normalization and recurrence evaluation
//! - per-day aggregation and month grid layout
//! - the SQLite-backed `EventStore` and configuration loading

pub mod agenda;
pub mod config;
pub mod error;
pub mod event;
pub mod month;
pub mod recurrence;
pub mod store;
pub mod window;

pub use agenda::events_on;
pub use error::{EventcalError, EventcalResult};
pub use event::{Event, EventDraft, Frequency, NewEvent};
pub use month::{CalendarMonth, DayCell, MonthCell, MonthGrid, build_month, days_in_month};
pub use recurrence::{Recurrence, occurs_on};
pub use store::EventStore;
pub use window::{covers_date, date_only};
