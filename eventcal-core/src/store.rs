//! Event persistence using SQLite

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use crate::error::{EventcalError, EventcalResult};
use crate::event::{Event, Frequency, NewEvent};

const EVENT_COLUMNS: &str = "id, title, description, start_date, end_date, is_recurring, \
     frequency, days_of_week, created_at, updated_at";

/// SQLite-backed event store
pub struct EventStore {
    conn: Connection,
}

impl EventStore {
    /// Open (creating if needed) the database at `path`
    pub fn open(path: &Path) -> EventcalResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        debug!(path = %path.display(), "opening event store");
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_tables()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> EventcalResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> EventcalResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                is_recurring INTEGER NOT NULL DEFAULT 0,
                frequency TEXT,
                days_of_week TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (title, start_date)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_events_start_date ON events(start_date)",
            [],
        )?;

        Ok(())
    }

    /// All events, ordered by start date then id
    pub fn list(&self) -> EventcalResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_date, id"
        ))?;

        let events = stmt
            .query_map([], event_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = events.len(), "listed events");
        Ok(events)
    }

    pub fn get(&self, id: i64) -> EventcalResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"))?;

        Ok(stmt.query_row(params![id], event_from_row).optional()?)
    }

    /// Insert a new event.
    ///
    /// Fails with `Conflict` if an event with the same title and start already exists.
    pub fn create(&self, new: &NewEvent) -> EventcalResult<Event> {
        let now = Utc::now();
        let days_json = serde_json::to_string(&new.days_of_week)?;

        self.conn
            .execute(
                "INSERT INTO events (title, description, start_date, end_date, is_recurring,
                     frequency, days_of_week, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                params![
                    new.title,
                    new.description,
                    new.start_date,
                    new.end_date,
                    new.is_recurring,
                    new.frequency.map(|f| f.as_str()),
                    days_json,
                    now,
                ],
            )
            .map_err(|e| conflict_or(e, new))?;

        let id = self.conn.last_insert_rowid();
        debug!(id, title = %new.title, "created event");

        self.get(id)?.ok_or(EventcalError::NotFound(id))
    }

    /// Replace every user-editable field of event `id`.
    pub fn update(&self, id: i64, new: &NewEvent) -> EventcalResult<Event> {
        let days_json = serde_json::to_string(&new.days_of_week)?;

        let affected = self
            .conn
            .execute(
                "UPDATE events SET title = ?2, description = ?3, start_date = ?4, end_date = ?5,
                     is_recurring = ?6, frequency = ?7, days_of_week = ?8, updated_at = ?9
                 WHERE id = ?1",
                params![
                    id,
                    new.title,
                    new.description,
                    new.start_date,
                    new.end_date,
                    new.is_recurring,
                    new.frequency.map(|f| f.as_str()),
                    days_json,
                    Utc::now(),
                ],
            )
            .map_err(|e| conflict_or(e, new))?;

        if affected == 0 {
            return Err(EventcalError::NotFound(id));
        }

        debug!(id, title = %new.title, "updated event");
        self.get(id)?.ok_or(EventcalError::NotFound(id))
    }

    /// Delete event `id`, returning what was removed.
    pub fn delete(&self, id: i64) -> EventcalResult<Event> {
        let event = self.get(id)?.ok_or(EventcalError::NotFound(id))?;

        self.conn
            .execute("DELETE FROM events WHERE id = ?1", params![id])?;

        debug!(id, title = %event.title, "deleted event");
        Ok(event)
    }
}

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    let frequency: Option<String> = row.get(6)?;
    let days_json: String = row.get(7)?;
    let days_of_week: Vec<String> = serde_json::from_str(&days_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        start_date: row.get::<_, DateTime<Utc>>(3)?,
        end_date: row.get::<_, DateTime<Utc>>(4)?,
        is_recurring: row.get(5)?,
        frequency: frequency.as_deref().map(Frequency::from_name),
        days_of_week,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Map a UNIQUE(title, start_date) violation to `Conflict`.
fn conflict_or(err: rusqlite::Error, new: &NewEvent) -> EventcalError {
    match err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            EventcalError::Conflict {
                title: new.title.clone(),
                start: new.start_date,
            }
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_event(title: &str, day: u32) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: None,
            start_date: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap(),
            is_recurring: false,
            frequency: None,
            days_of_week: vec![],
        }
    }

    #[test]
    fn create_then_get_round_trips_fields() {
        let store = EventStore::in_memory().unwrap();

        let mut new = new_event("Gym", 4);
        new.description = Some("leg day".into());
        new.is_recurring = true;
        new.frequency = Some(Frequency::Weekly);
        new.days_of_week = vec!["Mon".into(), "Thu".into()];

        let created = store.create(&new).unwrap();
        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get(created.id).unwrap().expect("event should exist");
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Gym");
        assert_eq!(fetched.description.as_deref(), Some("leg day"));
        assert_eq!(fetched.start_date, new.start_date);
        assert_eq!(fetched.end_date, new.end_date);
        assert!(fetched.is_recurring);
        assert_eq!(fetched.frequency, Some(Frequency::Weekly));
        assert_eq!(fetched.days_of_week, vec!["Mon", "Thu"]);
    }

    #[test]
    fn get_unknown_id_is_none() {
        let store = EventStore::in_memory().unwrap();
        assert!(store.get(42).unwrap().is_none());
    }

    #[test]
    fn list_is_ordered_by_start_date() {
        let store = EventStore::in_memory().unwrap();
        store.create(&new_event("Later", 20)).unwrap();
        store.create(&new_event("Earlier", 2)).unwrap();
        store.create(&new_event("Middle", 10)).unwrap();

        let events = store.list().unwrap();
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Earlier", "Middle", "Later"]);
    }

    #[test]
    fn duplicate_title_and_start_is_a_conflict() {
        let store = EventStore::in_memory().unwrap();
        store.create(&new_event("Standup", 1)).unwrap();

        let err = store.create(&new_event("Standup", 1)).unwrap_err();
        assert!(matches!(err, EventcalError::Conflict { ref title, .. } if title == "Standup"));

        // Same title on another day is fine
        store.create(&new_event("Standup", 2)).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn update_replaces_fields_and_bumps_updated_at() {
        let store = EventStore::in_memory().unwrap();
        let created = store.create(&new_event("Draft", 5)).unwrap();

        let mut changes = new_event("Final", 6);
        changes.is_recurring = true;
        changes.frequency = Some(Frequency::Monthly);

        let updated = store.update(created.id, &changes).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.frequency, Some(Frequency::Monthly));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let store = EventStore::in_memory().unwrap();
        assert!(matches!(
            store.update(9, &new_event("Ghost", 1)),
            Err(EventcalError::NotFound(9))
        ));
    }

    #[test]
    fn update_into_existing_title_and_start_is_a_conflict() {
        let store = EventStore::in_memory().unwrap();
        store.create(&new_event("A", 1)).unwrap();
        let b = store.create(&new_event("B", 2)).unwrap();

        assert!(matches!(
            store.update(b.id, &new_event("A", 1)),
            Err(EventcalError::Conflict { .. })
        ));
    }

    #[test]
    fn delete_returns_event_and_removes_it() {
        let store = EventStore::in_memory().unwrap();
        let created = store.create(&new_event("Dentist", 12)).unwrap();

        let deleted = store.delete(created.id).unwrap();
        assert_eq!(deleted.title, "Dentist");
        assert!(store.get(created.id).unwrap().is_none());
        assert!(matches!(store.delete(created.id), Err(EventcalError::NotFound(_))));
    }

    #[test]
    fn unknown_frequency_survives_storage_as_unrecognized() {
        let store = EventStore::in_memory().unwrap();
        let mut new = new_event("Odd", 3);
        new.is_recurring = true;
        new.frequency = Some(Frequency::Unrecognized);

        let created = store.create(&new).unwrap();
        assert_eq!(created.frequency, Some(Frequency::Unrecognized));
    }

    #[test]
    fn open_creates_parent_directories_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/events.db");

        let id = {
            let store = EventStore::open(&path).unwrap();
            store.create(&new_event("Persisted", 7)).unwrap().id
        };

        let reopened = EventStore::open(&path).unwrap();
        assert_eq!(reopened.get(id).unwrap().unwrap().title, "Persisted");
    }
}
