//! Recurrence projection.
//!
//! Projects a recurring event onto a calendar day: the occurrence keeps the
//! base event's time of day (hour and minute) and duration. There are no
//! termination rules and no exclusion dates; a series runs forever from its
//! base start day.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::event::{Event, Recurrence};
use crate::interval::Interval;

/// The occurrence of a recurring `event` on `date`, or `None` when the event
/// does not occur that day.
///
/// Non-recurring events always yield `None`; they are placed by
/// [`crate::occurrence`] directly from their own start and end.
pub fn project(event: &Event, date: NaiveDate) -> Option<Interval> {
    if !repeats_on(event, date) {
        return None;
    }
    let start = at_base_time(event, date)?;
    let end = start.checked_add_signed(event.duration())?;
    Interval::new(start, end).ok()
}

/// Whether the recurrence pattern of `event` selects `date`.
fn repeats_on(event: &Event, date: NaiveDate) -> bool {
    // Never look backward past the base start day
    if date < event.start_date() {
        return false;
    }

    match &event.recurrence {
        Recurrence::Daily => true,
        Recurrence::Weekly { days } => days.contains(date.weekday()),
        Recurrence::Monthly => date.day() == event.anchor_day(),
        Recurrence::None | Recurrence::Other(_) => false,
    }
}

/// `date` combined with the hour and minute of the base start.
fn at_base_time(event: &Event, date: NaiveDate) -> Option<NaiveDateTime> {
    let time = NaiveTime::from_hms_opt(event.start.hour(), event.start.minute(), 0)?;
    Some(date.and_time(time))
}
