use anyhow::Result;
use eventcal_core::{EventDraft, EventStore, Frequency};
use owo_colors::OwoColorize;
use tracing::info;

use crate::commands::apply_recurrence;
use crate::render::Render;

pub fn run(
    store: &EventStore,
    title: String,
    start: String,
    end: String,
    description: Option<String>,
    frequency: Option<Frequency>,
    days: Option<Vec<String>>,
) -> Result<()> {
    let mut draft = EventDraft {
        title: Some(title),
        description,
        start_date: Some(start),
        end_date: Some(end),
        ..Default::default()
    };
    apply_recurrence(&mut draft, frequency, days);

    let new = draft.validate()?;
    let event = store.create(&new)?;
    info!(id = event.id, title = %event.title, "created event");

    println!("{} {}", "Created:".green(), event.render());
    Ok(())
}
