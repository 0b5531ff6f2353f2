//! Terminal rendering for daycal types.
//!
//! Extension traits that add colored output to daycal-core types using
//! owo_colors.

use chrono::{Datelike, NaiveDate};
use daycal_core::{Category, Event, Occurrence, Placement};
use owo_colors::OwoColorize;

/// Width of the day-view timeline, in characters.
const TIMELINE_WIDTH: usize = 48;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        let label = format!("[{}]", self);
        match self {
            Category::General => label.dimmed().to_string(),
            Category::Work => label.blue().to_string(),
            Category::Personal => label.green().to_string(),
            Category::Meeting => label.magenta().to_string(),
            Category::Holiday => label.yellow().to_string(),
            Category::Study => label.cyan().to_string(),
            Category::Health => label.red().to_string(),
        }
    }
}

impl Render for Occurrence<'_> {
    fn render(&self) -> String {
        let time = format!("{}-{}", self.start().format("%H:%M"), self.end().format("%H:%M"));
        format!(
            "{} {}{} {}",
            time,
            self.event.title,
            recurring_marker(self.event),
            self.event.category.render()
        )
    }
}

impl Render for Event {
    /// One line for listings: id prefix, time, title and recurrence.
    fn render(&self) -> String {
        let id = self.id.to_string();
        let short_id = &id[..8];
        let time = format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"));
        let mut line = format!(
            "{} {} {}{} {}",
            short_id.dimmed(),
            time,
            self.title,
            recurring_marker(self),
            self.category.render()
        );

        if self.is_recurring() {
            line.push_str(&format!(" {}", self.recurrence.to_string().dimmed()));
        }

        line
    }
}

fn recurring_marker(event: &Event) -> &'static str {
    if event.is_recurring() { " (R)" } else { "" }
}

/// Horizontal bar showing where an occurrence sits in its day.
pub fn render_timeline(placement: Placement) -> String {
    let scale = TIMELINE_WIDTH as f64 / 100.0;
    let start = ((placement.top_percent * scale).round() as usize).min(TIMELINE_WIDTH);
    let len = ((placement.height_percent * scale).round() as usize)
        .max(1)
        .min(TIMELINE_WIDTH - start.min(TIMELINE_WIDTH - 1));
    let start = start.min(TIMELINE_WIDTH - len);

    format!(
        "{}{}{}",
        "·".repeat(start).dimmed(),
        "█".repeat(len),
        "·".repeat(TIMELINE_WIDTH - start - len).dimmed()
    )
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// One month-grid cell: the day number, and the number of occurrences.
pub fn render_month_cell(date: NaiveDate, month: u32, count: usize, today: NaiveDate) -> String {
    let day = format!("{:>2}", date.day());
    let day = if date == today {
        day.reversed().to_string()
    } else if date.month() != month {
        day.dimmed().to_string()
    } else {
        day
    };

    let marker = match count {
        0 => "   ".to_string(),
        n if n < 10 => format!(" •{}", n),
        _ => " •+".to_string(),
    };

    if count > 0 {
        format!("{}{}", day, marker.yellow())
    } else {
        format!("{}{}", day, marker)
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
