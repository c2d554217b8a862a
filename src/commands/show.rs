use anyhow::Result;
use eventcal_core::EventStore;

use crate::commands::require_event;
use crate::render::render_event_detail;

pub fn run(store: &EventStore, id: i64) -> Result<()> {
    let event = require_event(store, id)?;
    println!("{}", render_event_detail(&event));
    Ok(())
}
