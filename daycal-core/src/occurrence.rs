//! Which events occur on a given day, and where to draw them.
//!
//! One filter serves all three views. The month view only needs to know
//! *whether* an event occurs ([`Clip::None`]); the week and day grids also
//! need the part of the occurrence that falls inside the displayed day
//! ([`Clip::ToDay`]) and its position on a 1440-minute scale.

use chrono::{NaiveDate, NaiveDateTime};

use crate::date_range::DateRange;
use crate::event::Event;
use crate::interval::Interval;
use crate::recurrence::project;

const MINUTES_PER_DAY: f64 = 1440.0;

/// View-specific clipping of occurrences at day boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clip {
    /// Keep the true occurrence interval (month view, listings).
    #[default]
    None,
    /// Clamp to `[date 00:00, date+1 00:00]` (week and day grids).
    ToDay,
}

/// An event occurring on one day, with the interval to use for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence<'a> {
    pub event: &'a Event,
    pub date: NaiveDate,
    pub interval: Interval,
}

/// Vertical position of an occurrence on a day column, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top_percent: f64,
    pub height_percent: f64,
}

impl Occurrence<'_> {
    pub fn start(&self) -> NaiveDateTime {
        self.interval.start()
    }

    pub fn end(&self) -> NaiveDateTime {
        self.interval.end()
    }

    /// Position within this occurrence's day. Only the part of the interval
    /// inside the day counts, whatever clipping was used to build it.
    pub fn placement(&self) -> Placement {
        let day = Interval::day(self.date);
        let Some(visible) = self.interval.clamp(day.start(), day.end()) else {
            return Placement {
                top_percent: 0.0,
                height_percent: 0.0,
            };
        };

        let top = (visible.start() - day.start()).num_minutes() as f64;
        let height = visible.duration().num_minutes() as f64;

        Placement {
            top_percent: (top / MINUTES_PER_DAY * 100.0).max(0.0),
            height_percent: (height / MINUTES_PER_DAY * 100.0).max(0.0),
        }
    }
}

/// Whether `event` occurs on `date`.
///
/// A one-off event occurs on its start day, its end day, and every day it
/// passes through. A recurring event occurs wherever it projects.
pub fn occurs_on(event: &Event, date: NaiveDate) -> bool {
    if event.is_recurring() {
        return project(event, date).is_some();
    }
    spans_day(event, date)
}

fn spans_day(event: &Event, date: NaiveDate) -> bool {
    let midnight = Interval::day(date).start();
    event.start.date() == date
        || event.end.date() == date
        || (event.start < midnight && midnight < event.end)
}

/// The effective interval of `event` on `date`, if it occurs.
fn effective_interval(event: &Event, date: NaiveDate, clip: Clip) -> Option<Interval> {
    let base = match event.interval() {
        Ok(interval) => interval,
        Err(e) => {
            tracing::warn!(event = %event.id, title = %event.title, "skipping malformed event: {e}");
            return None;
        }
    };

    let interval = if event.is_recurring() {
        project(event, date)?
    } else if spans_day(event, date) {
        base
    } else {
        return None;
    };

    match clip {
        Clip::None => Some(interval),
        Clip::ToDay => {
            let day = Interval::day(date);
            // An event ending exactly at midnight still shows as a zero-height entry
            interval
                .clamp(day.start(), day.end())
                .or_else(|| Interval::new(day.start(), day.start()).ok())
        }
    }
}

/// Events occurring on `date`, ordered by effective start. Ties keep the
/// input order.
pub fn occurrences_on(events: &[Event], date: NaiveDate, clip: Clip) -> Vec<Occurrence<'_>> {
    let mut occurrences: Vec<Occurrence<'_>> = events
        .iter()
        .filter_map(|event| {
            effective_interval(event, date, clip).map(|interval| Occurrence {
                event,
                date,
                interval,
            })
        })
        .collect();

    // sort_by_key is stable
    occurrences.sort_by_key(|o| o.interval.start());
    occurrences
}

/// Occurrences for every day of `range`, one entry per day (possibly empty).
pub fn occurrences_in<'a>(
    events: &'a [Event],
    range: &DateRange,
    clip: Clip,
) -> Vec<(NaiveDate, Vec<Occurrence<'a>>)> {
    range
        .days()
        .map(|date| (date, occurrences_on(events, date, clip)))
        .collect()
}
