//! Local event store.
//!
//! Owns the authoritative list of events and persists it as a JSON array of
//! event records. Every mutation that changes an event's time goes through
//! the conflict checker first; a rejected mutation leaves both the in-memory
//! list and the file untouched.

mod create;
mod delete;
mod update;

use std::path::{Path, PathBuf};

use daycal_core::{DayCalError, DayCalResult, Event, EventId, EventRecord};
use serde_json::Value;

pub struct EventStore {
    /// Path to the JSON file
    path: PathBuf,
    events: Vec<Event>,
    /// Records that could not be read; written back unchanged on save
    unreadable: Vec<Value>,
}

impl EventStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> DayCalResult<Self> {
        let path = path.into();

        if !path.exists() {
            return Ok(EventStore {
                path,
                events: Vec::new(),
                unreadable: Vec::new(),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        let records: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
            DayCalError::Serialization(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut events: Vec<Event> = Vec::with_capacity(records.len());
        let mut unreadable = Vec::new();

        for record in records {
            match read_record(&record) {
                Ok(event) if events.iter().any(|e| e.id == event.id) => {
                    tracing::warn!(id = %event.id, "duplicate event id in store, keeping the first");
                    unreadable.push(record);
                }
                Ok(event) => events.push(event),
                Err(e) => {
                    let title = record.get("title").and_then(Value::as_str).unwrap_or_default();
                    tracing::warn!(title, "skipping unreadable event: {e}");
                    unreadable.push(record);
                }
            }
        }

        tracing::debug!(path = %path.display(), count = events.len(), "loaded events");

        Ok(EventStore {
            path,
            events,
            unreadable,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of all readable events, in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Find an event by a unique prefix of its id.
    pub fn resolve(&self, prefix: &str) -> DayCalResult<&Event> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(DayCalError::EventNotFound(prefix));
        }

        let mut matches = self
            .events
            .iter()
            .filter(|e| e.id.to_string().starts_with(&prefix));

        match (matches.next(), matches.next()) {
            (Some(event), None) => Ok(event),
            (Some(_), Some(_)) => Err(DayCalError::AmbiguousEventId(prefix)),
            (None, _) => Err(DayCalError::EventNotFound(prefix)),
        }
    }

    fn position(&self, id: EventId) -> DayCalResult<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| DayCalError::EventNotFound(id.to_string()))
    }

    /// Replace the in-memory list with `events` and persist it. On a write
    /// failure the previous list is kept.
    fn commit(&mut self, events: Vec<Event>) -> DayCalResult<()> {
        write_records(&self.path, &events, &self.unreadable)?;
        self.events = events;
        Ok(())
    }
}

/// Parse one stored record. Fails on a wrong shape as well as on a bad id
/// or timestamp.
fn read_record(record: &Value) -> DayCalResult<Event> {
    let record: EventRecord = serde_json::from_value(record.clone())
        .map_err(|e| DayCalError::Serialization(e.to_string()))?;
    Event::try_from(record)
}

/// Write via a temporary file so a failed write never truncates the store.
fn write_records(path: &Path, events: &[Event], unreadable: &[Value]) -> DayCalResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut records = events
        .iter()
        .cloned()
        .map(|event| serde_json::to_value(EventRecord::from(event)))
        .collect::<Result<Vec<Value>, _>>()
        .map_err(|e| DayCalError::Serialization(e.to_string()))?;
    records.extend(unreadable.iter().cloned());

    let content = serde_json::to_string_pretty(&records)
        .map_err(|e| DayCalError::Serialization(e.to_string()))?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)?;

    tracing::debug!(path = %path.display(), count = events.len(), "saved events");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    pub fn at(y: i32, m: u32, d: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    pub fn temp_store() -> (tempfile::TempDir, EventStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::open(dir.path().join("events.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let (_dir, store) = temp_store();
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_round_trips_through_disk() {
        let (dir, mut store) = temp_store();
        let event = Event::new("Lunch", at(2024, 6, 1, 12, 0), at(2024, 6, 1, 13, 0)).unwrap();
        let id = event.id;
        store.create(event).unwrap();

        let reopened = EventStore::open(dir.path().join("events.json")).unwrap();
        assert_eq!(reopened.events().len(), 1);
        assert_eq!(reopened.get(id).unwrap().title, "Lunch");
    }

    #[test]
    fn test_unreadable_records_are_skipped_and_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "4f7c2a9e-0c4b-4b8e-9d0e-6d8a0d7b1f11", "title": "ok",
                 "start": "2024-06-01T09:00:00", "end": "2024-06-01T10:00:00",
                 "recurrence": "none", "category": "Work"},
                {"id": "5a1b2c3d-0c4b-4b8e-9d0e-6d8a0d7b1f22", "title": "broken",
                 "start": "Invalid Date", "end": "2024-06-01T10:00:00",
                 "recurrence": "none", "category": "Work"}
            ]"#,
        )
        .unwrap();

        let mut store = EventStore::open(&path).unwrap();
        assert_eq!(store.events().len(), 1);

        let event = Event::new("later", at(2024, 6, 1, 15, 0), at(2024, 6, 1, 16, 0)).unwrap();
        store.create(event).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Invalid Date"), "unreadable record kept on save");
    }

    #[test]
    fn test_records_of_the_wrong_shape_do_not_block_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 1717236000000, "title": "numeric id",
                 "start": "2024-06-01T09:00:00", "end": "2024-06-01T10:00:00",
                 "recurrence": "none", "category": "Work"},
                {"id": "5a1b2c3d-0c4b-4b8e-9d0e-6d8a0d7b1f22", "title": "no start",
                 "start": null, "end": "2024-06-01T10:00:00"},
                {"id": "6b2c3d4e-0c4b-4b8e-9d0e-6d8a0d7b1f33", "title": "bad weekday",
                 "start": "2024-06-01T09:00:00", "end": "2024-06-01T10:00:00",
                 "recurrence": "weekly", "selectedDaysOfWeek": [-1]},
                {"id": "4f7c2a9e-0c4b-4b8e-9d0e-6d8a0d7b1f11", "title": "ok",
                 "start": "2024-06-01T12:00:00", "end": "2024-06-01T13:00:00"}
            ]"#,
        )
        .unwrap();

        let mut store = EventStore::open(&path).unwrap();
        let titles: Vec<_> = store.events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["ok"]);

        let event = Event::new("later", at(2024, 6, 1, 15, 0), at(2024, 6, 1, 16, 0)).unwrap();
        store.create(event).unwrap();

        let saved: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.len(), 5);
        assert!(saved.iter().any(|r| r["id"] == 1717236000000_i64));
        assert!(saved.iter().any(|r| r["title"] == "no start" && r["start"].is_null()));
    }

    #[test]
    fn test_resolve_by_prefix() {
        let (_dir, mut store) = temp_store();
        let event = Event::new("Lunch", at(2024, 6, 1, 12, 0), at(2024, 6, 1, 13, 0)).unwrap();
        let id = event.id;
        store.create(event).unwrap();

        let prefix = &id.to_string()[..8];
        assert_eq!(store.resolve(prefix).unwrap().id, id);
        assert!(matches!(
            store.resolve("zzzz"),
            Err(DayCalError::EventNotFound(_))
        ));
        assert!(store.resolve("").is_err());
    }
}
