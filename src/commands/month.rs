use anyhow::Result;
use chrono::{Datelike, Utc};
use eventcal_core::{CalendarMonth, EventStore, build_month};

use crate::render::render_month;

pub fn run(
    store: &EventStore,
    year: Option<i32>,
    month: Option<u32>,
    max_per_day: usize,
) -> Result<()> {
    let today = Utc::now().date_naive();
    let year = year.unwrap_or(today.year());
    let month = CalendarMonth::new(year, month.unwrap_or(today.month()))?;

    let events = store.list()?;
    let grid = build_month(month, &events, today);

    println!("{}", render_month(&grid, max_per_day));
    Ok(())
}
