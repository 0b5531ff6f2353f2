use anyhow::Result;
use daycal_core::{Clip, occurrences_on};
use owo_colors::OwoColorize;

use super::{FilterArgs, date_or_today};
use crate::render::{Render, format_date_label, render_timeline};
use crate::store::EventStore;

pub fn run(store: &EventStore, filter: &FilterArgs, date: Option<&str>) -> Result<()> {
    let date = date_or_today(date)?;
    let events = filter.to_filter().apply(store.events());
    let occurrences = occurrences_on(&events, date, Clip::ToDay);

    println!(
        "{}",
        format!("{}  {}", date.format("%A %B %-d %Y"), format_date_label(date, super::today())).bold()
    );

    if occurrences.is_empty() {
        println!("{}", "No events".dimmed());
        return Ok(());
    }

    println!("  {}", "00:00       06:00       12:00       18:00       ".dimmed());
    for occurrence in &occurrences {
        println!("  {}", render_timeline(occurrence.placement()));
        println!("  {}", occurrence.render());
        if let Some(description) = &occurrence.event.description {
            println!("    {}", description.dimmed());
        }
    }

    Ok(())
}
