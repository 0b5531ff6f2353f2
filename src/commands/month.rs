use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use daycal_core::{Clip, DateRange, occurrences_in};
use owo_colors::OwoColorize;

use super::FilterArgs;
use crate::render::{Render, pluralize, render_month_cell};
use crate::store::EventStore;

const WEEKDAY_HEADER: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Print the month grid, then the month's events by day.
pub fn run(store: &EventStore, filter: &FilterArgs, month: Option<&str>) -> Result<()> {
    let today = super::today();
    let first = match month {
        Some(s) => parse_month(s)?,
        None => today.with_day(1).unwrap_or(today),
    };

    let events = filter.to_filter().apply(store.events());
    let grid = DateRange::month_grid(first.year(), first.month())?;
    let per_day = occurrences_in(&events, &grid, Clip::None);

    println!("{}", first.format("%B %Y").bold());
    println!(
        "{}",
        WEEKDAY_HEADER
            .iter()
            .map(|d| format!("{:<5}", d))
            .collect::<String>()
            .dimmed()
    );

    for week in per_day.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|(date, occurrences)| render_month_cell(*date, first.month(), occurrences.len(), today))
            .collect();
        println!("{}", row.join(""));
    }

    let in_month = per_day
        .iter()
        .filter(|(date, occurrences)| date.month() == first.month() && !occurrences.is_empty());

    let mut total = 0;
    for (date, occurrences) in in_month {
        println!();
        println!("{}", date.format("%a %b %-d").bold());
        for occurrence in occurrences {
            println!("  {}", occurrence.render());
        }
        total += occurrences.len();
    }

    println!();
    println!("{}", format!("{} {}", total, pluralize("event", total)).dimmed());

    Ok(())
}

/// Parse YYYY-MM into the first day of that month.
fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", s))
}
