//! Add events to the store.

use daycal_core::{DayCalError, DayCalResult, Event, find_conflict};

use super::EventStore;

impl EventStore {
    /// Validate `event`, check it against every stored event and append it.
    ///
    /// On a conflict nothing is written and the store is unchanged.
    pub fn create(&mut self, event: Event) -> DayCalResult<&Event> {
        event.validate()?;

        if self.get(event.id).is_some() {
            return Err(DayCalError::InvalidEvent(format!(
                "an event with id {} already exists",
                event.id
            )));
        }

        if let Some(existing) = find_conflict(&event, &self.events) {
            tracing::info!(title = %event.title, conflicts_with = %existing.title, "rejected new event");
            return Err(DayCalError::Conflict {
                title: existing.title.clone(),
            });
        }

        let mut events = self.events.clone();
        events.push(event);
        self.commit(events)?;

        let created = &self.events[self.events.len() - 1];
        tracing::info!(id = %created.id, title = %created.title, "created event");
        Ok(created)
    }
}
