use anyhow::Result;
use daycal_core::date_range::parse_date;
use owo_colors::OwoColorize;

use crate::render::{Render, format_date_label};
use crate::store::EventStore;

/// Move a one-off event to another day, keeping its time and length.
pub fn run(store: &mut EventStore, id: &str, date: &str) -> Result<()> {
    let date = parse_date(date)?;
    let id = store.resolve(id)?.id;

    let moved = store.reschedule(id, date)?;

    println!(
        "{}",
        format!("  Moved: {} to {}", moved.title, format_date_label(date, super::today())).yellow()
    );
    println!("  {}", moved.render());

    Ok(())
}
