//! Moving an event to another day (drag-and-drop in a calendar view).

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::error::{DayCalError, DayCalResult};
use crate::event::Event;

/// A copy of `event` moved onto `date`.
///
/// Keeps the hour and minute of the start and the duration in whole minutes;
/// everything else is unchanged. Callers should only move events for which
/// [`Event::is_movable`] holds, and must run a conflict check before
/// committing the result. Fails when the moved end falls outside the
/// representable date range.
pub fn rescheduled_to(event: &Event, date: NaiveDate) -> DayCalResult<Event> {
    let time = NaiveTime::from_hms_opt(event.start.hour(), event.start.minute(), 0)
        .unwrap_or(NaiveTime::MIN);
    let start = date.and_time(time);
    let end = start.checked_add_signed(event.duration()).ok_or_else(|| {
        DayCalError::InvalidEvent(format!("cannot move '{}' to {}: date out of range", event.title, date))
    })?;
    Ok(Event {
        start,
        end,
        ..event.clone()
    })
}
