use anyhow::Result;
use eventcal_core::{EventDraft, EventStore, Frequency};
use owo_colors::OwoColorize;
use tracing::info;

use crate::commands::{apply_recurrence, require_event};
use crate::render::Render;

/// Fields given on the command line; `None` keeps the stored value
pub struct Changes {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<Frequency>,
    pub days: Option<Vec<String>>,
    pub no_repeat: bool,
}

pub fn run(store: &EventStore, id: i64, changes: Changes) -> Result<()> {
    let existing = require_event(store, id)?;
    let mut draft = EventDraft::from_event(&existing);

    if let Some(title) = changes.title {
        draft.title = Some(title);
    }
    if let Some(start) = changes.start {
        draft.start_date = Some(start);
    }
    if let Some(end) = changes.end {
        draft.end_date = Some(end);
    }
    if let Some(description) = changes.description {
        draft.description = Some(description);
    }

    if changes.no_repeat {
        draft.is_recurring = Some(false);
        draft.frequency = None;
        draft.days_of_week = Some(Vec::new());
    } else {
        apply_recurrence(&mut draft, changes.frequency, changes.days);
    }

    let new = draft.validate()?;
    let event = store.update(id, &new)?;
    info!(id, title = %event.title, "updated event");

    println!("{} {}", "Updated:".yellow(), event.render());
    Ok(())
}
