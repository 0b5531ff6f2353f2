//! Edit and move stored events.

use chrono::NaiveDate;
use daycal_core::{DayCalError, DayCalResult, Event, EventId, find_conflict, rescheduled_to};

use super::EventStore;

impl EventStore {
    /// Replace the stored event with the same id as `event`.
    ///
    /// The edited event is checked against every other event; it never
    /// conflicts with its own previous version.
    pub fn update(&mut self, event: Event) -> DayCalResult<&Event> {
        event.validate()?;
        let index = self.position(event.id)?;

        if let Some(existing) = find_conflict(&event, &self.events) {
            tracing::info!(title = %event.title, conflicts_with = %existing.title, "rejected edit");
            return Err(DayCalError::Conflict {
                title: existing.title.clone(),
            });
        }

        let mut events = self.events.clone();
        events[index] = event;
        self.commit(events)?;

        let updated = &self.events[index];
        tracing::info!(id = %updated.id, title = %updated.title, "updated event");
        Ok(updated)
    }

    /// Move a one-off event to `date`, keeping its time of day and duration.
    pub fn reschedule(&mut self, id: EventId, date: NaiveDate) -> DayCalResult<&Event> {
        let index = self.position(id)?;
        let event = &self.events[index];

        if !event.is_movable() {
            return Err(DayCalError::NotMovable(event.title.clone()));
        }

        let moved = rescheduled_to(event, date)?;
        tracing::debug!(id = %id, from = %event.start, to = %moved.start, "rescheduling");
        self.update(moved)
    }
}
