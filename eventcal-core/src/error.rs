//! Error types for eventcal.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur outside the pure evaluation path
/// (loading config, validating drafts, talking to the store).
#[derive(Error, Debug)]
pub enum EventcalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("'{0}' is not a valid date/time")]
    InvalidTimestamp(String),

    #[error("Event not found: {0}")]
    NotFound(i64),

    #[error("Event with this title and start time already exists: '{title}' at {start}")]
    Conflict { title: String, start: DateTime<Utc> },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EventcalError {
    fn from(err: serde_json::Error) -> Self {
        EventcalError::Serialization(err.to_string())
    }
}

/// Result type alias for eventcal operations.
pub type EventcalResult<T> = Result<T, EventcalError>;
