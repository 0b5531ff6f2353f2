//! Remove events from the store.

use daycal_core::{DayCalResult, Event, EventId};

use super::EventStore;

impl EventStore {
    /// Remove the event with `id` and return it.
    pub fn delete(&mut self, id: EventId) -> DayCalResult<Event> {
        let index = self.position(id)?;

        let mut events = self.events.clone();
        let removed = events.remove(index);
        self.commit(events)?;

        tracing::info!(id = %removed.id, title = %removed.title, "deleted event");
        Ok(removed)
    }
}
