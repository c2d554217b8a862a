use anyhow::Result;
use eventcal_core::EventStore;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(store: &EventStore) -> Result<()> {
    let events = store.list()?;

    if events.is_empty() {
        let hint = "No events yet. Create one with `eventcal new`.";
        println!("{}", hint.dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{}", event.render());
    }

    println!("\n{} event(s)", events.len());
    Ok(())
}
