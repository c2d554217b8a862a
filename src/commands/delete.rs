use anyhow::Result;
use eventcal_core::EventStore;
use owo_colors::OwoColorize;
use tracing::info;

pub fn run(store: &EventStore, id: i64) -> Result<()> {
    let event = store.delete(id)?;
    info!(id, title = %event.title, "deleted event");

    println!("{} {}", "Deleted:".red(), event.title);
    Ok(())
}
