use anyhow::Result;
use eventcal_core::event::parse_date;
use eventcal_core::{EventStore, events_on};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(store: &EventStore, date: &str) -> Result<()> {
    let date = parse_date(date)?;
    let events = store.list()?;
    let on_day = events_on(&events, date);

    let heading = date.format("%A, %B %-d, %Y").to_string();
    println!("{}", heading.bold());

    if on_day.is_empty() {
        println!("{}", "No events".dimmed());
        return Ok(());
    }

    for event in on_day {
        println!("  {}", event.render());
    }

    Ok(())
}
