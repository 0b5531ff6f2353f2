use anyhow::Result;
use daycal_core::{Clip, DateRange, occurrences_in};
use owo_colors::OwoColorize;

use super::FilterArgs;
use crate::render::{Render, format_date_label};
use crate::store::EventStore;

/// List occurrences in a date range grouped by day, with event ids for
/// `edit`, `move` and `delete`.
pub fn run(store: &EventStore, filter: &FilterArgs, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let today = super::today();
    let range = DateRange::from_args(from, to, today)?;

    let events = filter.to_filter().apply(store.events());
    let per_day: Vec<_> = occurrences_in(&events, &range, Clip::None)
        .into_iter()
        .filter(|(_, occurrences)| !occurrences.is_empty())
        .collect();

    if per_day.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, (date, occurrences)) in per_day.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", format_date_label(*date, today).bold());

        for occurrence in occurrences {
            let id = occurrence.event.id.to_string();
            let short_id = &id[..8];
            println!("  {} {}", short_id.dimmed(), occurrence.render());
        }
    }

    Ok(())
}
