//! Event types.
//!
//! `Event` is what the store hands out and what the evaluator reads.
//! `EventDraft` is the loosely-typed create/update body; `validate` turns it
//! into a `NewEvent` the store can persist.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EventcalError, EventcalResult};

/// A stored calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    // Recurrence fields
    /// Gates recurrence evaluation; when false the rule fields are ignored
    pub is_recurring: bool,
    /// Only meaningful when `is_recurring` is set
    pub frequency: Option<Frequency>,
    /// Weekday abbreviations ("Sun".."Sat"), only meaningful for weekly
    #[serde(default)]
    pub days_of_week: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How often a recurring event repeats.
///
/// Anything other than the three known names deserializes to `Unrecognized`
/// so the evaluator can fall back to the literal window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    #[serde(other)]
    Unrecognized,
}

impl Frequency {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            _ => Frequency::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Event {
    /// Human-readable recurrence summary, e.g. "weekly (Mon, Wed)".
    pub fn recurrence_summary(&self) -> Option<String> {
        if !self.is_recurring {
            return None;
        }

        let frequency = self.frequency?;
        let days: Vec<&str> = self.days_of_week.iter().map(|d| d.as_str()).collect();

        if frequency == Frequency::Weekly && !days.is_empty() {
            Some(format!("{} ({})", frequency, days.join(", ")))
        } else {
            Some(frequency.to_string())
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Validated fields for creating or replacing an event.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_recurring: bool,
    pub frequency: Option<Frequency>,
    pub days_of_week: Vec<String>,
}

/// Request body for creating or updating an event.
///
/// Every field is optional so that missing values can be reported as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_recurring: Option<bool>,
    pub frequency: Option<String>,
    pub days_of_week: Option<Vec<String>>,
}

impl EventDraft {
    /// Start a draft from an existing event so individual fields can be overridden.
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            title: Some(event.title.clone()),
            description: event.description.clone(),
            start_date: Some(event.start_date.to_rfc3339()),
            end_date: Some(event.end_date.to_rfc3339()),
            is_recurring: Some(event.is_recurring),
            frequency: event.frequency.map(|f| f.as_str().to_string()),
            days_of_week: Some(event.days_of_week.clone()),
        }
    }

    pub fn validate(self) -> EventcalResult<NewEvent> {
        let (Some(title), Some(start), Some(end)) = (
            non_empty(self.title),
            non_empty(self.start_date),
            non_empty(self.end_date),
        ) else {
            return Err(EventcalError::Validation("Missing required fields".into()));
        };

        let start_date = parse_field("startDate", &start)?;
        let end_date = parse_field("endDate", &end)?;

        Ok(NewEvent {
            title: title.trim().to_string(),
            description: non_empty(self.description),
            start_date,
            end_date,
            is_recurring: self.is_recurring.unwrap_or(false),
            frequency: non_empty(self.frequency).map(|f| Frequency::from_name(&f)),
            days_of_week: self
                .days_of_week
                .unwrap_or_default()
                .into_iter()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect(),
        })
    }
}

/// Parse a timestamp field, naming the field in the error
fn parse_field(field: &str, value: &str) -> EventcalResult<DateTime<Utc>> {
    parse_timestamp(value)
        .map_err(|e| EventcalError::Validation(format!("Invalid {field}: {e}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a timestamp as UTC.
///
/// Accepts RFC 3339, or a naive `YYYY-MM-DDTHH:MM[:SS]` / `YYYY-MM-DD` value
/// which is taken to already be UTC.
pub fn parse_timestamp(s: &str) -> EventcalResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| EventcalError::InvalidTimestamp(s.to_string()))
}

/// Parse YYYY-MM-DD as a calendar date
pub fn parse_date(s: &str) -> EventcalResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| EventcalError::InvalidDate(s.to_string()))
}
