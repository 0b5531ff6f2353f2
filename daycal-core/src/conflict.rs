//! Conflict checks run before an event is created, edited or moved.
//!
//! Overlap is inclusive: an event that starts exactly when another ends
//! conflicts with it.
//!
//! Pairs where both events recur are not compared, and a one-off event
//! starting on an earlier day than a recurring series never conflicts with
//! it. Both are long-standing behaviors of the checker and are kept as-is.

use crate::event::Event;
use crate::interval::Interval;
use crate::recurrence::project;

/// Whether `candidate` overlaps any event in `events` other than itself.
pub fn has_conflict(candidate: &Event, events: &[Event]) -> bool {
    find_conflict(candidate, events).is_some()
}

/// The first event in `events` that `candidate` conflicts with.
///
/// `candidate` is matched against `events` by id and never conflicts with
/// its own stored copy. Malformed intervals are logged and skipped.
pub fn find_conflict<'a>(candidate: &Event, events: &'a [Event]) -> Option<&'a Event> {
    let candidate_interval = match candidate.interval() {
        Ok(interval) => interval,
        Err(e) => {
            tracing::warn!(event = %candidate.id, title = %candidate.title, "invalid interval for conflict check: {e}");
            return None;
        }
    };

    events
        .iter()
        .filter(|existing| existing.id != candidate.id)
        .find(|existing| conflicts_with(candidate, &candidate_interval, existing))
}

fn conflicts_with(candidate: &Event, candidate_interval: &Interval, existing: &Event) -> bool {
    let existing_interval = match existing.interval() {
        Ok(interval) => interval,
        Err(e) => {
            tracing::warn!(event = %existing.id, title = %existing.title, "invalid interval for existing event, skipping: {e}");
            return false;
        }
    };

    if !existing.is_recurring() {
        return candidate_interval.overlaps(&existing_interval);
    }

    if candidate.is_recurring() {
        return false;
    }

    // A series cannot conflict with something scheduled before it began
    if candidate.start < existing.start && candidate.start_date() != existing.start_date() {
        return false;
    }

    match project(existing, candidate.start_date()) {
        Some(projected) => candidate_interval.overlaps(&projected),
        None => false,
    }
}
