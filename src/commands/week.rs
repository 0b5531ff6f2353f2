use anyhow::Result;
use daycal_core::{Clip, DateRange, occurrences_in};
use owo_colors::OwoColorize;

use super::{FilterArgs, date_or_today};
use crate::render::{Render, format_date_label, render_timeline};
use crate::store::EventStore;

/// Print the Monday-to-Sunday week containing `date`, each occurrence
/// clipped to its day.
pub fn run(store: &EventStore, filter: &FilterArgs, date: Option<&str>) -> Result<()> {
    let today = super::today();
    let week = DateRange::week_of(date_or_today(date)?);

    let events = filter.to_filter().apply(store.events());

    println!(
        "{}",
        format!("Week of {} to {}", week.from.format("%b %-d"), week.to.format("%b %-d %Y")).bold()
    );

    for (day, occurrences) in occurrences_in(&events, &week, Clip::ToDay) {
        println!();
        let label = format!("{}  {}", day.format("%a %b %-d"), format_date_label(day, today));
        if day == today {
            println!("{}", label.bold().underline());
        } else {
            println!("{}", label.bold());
        }

        if occurrences.is_empty() {
            println!("  {}", "-".dimmed());
            continue;
        }

        for occurrence in &occurrences {
            println!("  {} {}", render_timeline(occurrence.placement()), occurrence.render());
        }
    }

    Ok(())
}
