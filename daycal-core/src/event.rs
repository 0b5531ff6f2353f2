//! Event types.
//!
//! `Event` is the typed form the engine works with. `EventRecord` is the
//! flat shape persisted by the store:
//! `{ id, title, description?, start, end, recurrence, selectedDaysOfWeek?, category }`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DayCalError, DayCalResult};
use crate::interval::{Interval, IntervalError};

/// Wall-clock format used on disk.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Accepted on read; the seconds are optional.
const TIMESTAMP_FORMAT_SHORT: &str = "%Y-%m-%dT%H:%M";

pub fn parse_timestamp(s: &str) -> DayCalResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT_SHORT))
        .map_err(|_| DayCalError::InvalidTimestamp(s.to_string()))
}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Opaque event identifier, assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        EventId(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EventId {
    type Err = DayCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(EventId)
            .map_err(|e| DayCalError::InvalidEvent(format!("bad id '{s}': {e}")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    Meeting,
    Holiday,
    Study,
    Health,
    // Unrecognised stored values fall back to General
    #[default]
    #[serde(other)]
    General,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Work,
        Category::Personal,
        Category::Meeting,
        Category::Holiday,
        Category::Study,
        Category::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Meeting => "Meeting",
            Category::Holiday => "Holiday",
            Category::Study => "Study",
            Category::Health => "Health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DayCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
                DayCalError::InvalidEvent(format!(
                    "unknown category '{}'. Available: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// Set of weekdays a weekly event repeats on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Weekdays(u8);

impl Weekdays {
    pub fn empty() -> Self {
        Weekdays(0)
    }

    /// Build from 0=Sunday..6=Saturday indices. Out-of-range indices are ignored.
    pub fn from_indices(indices: impl IntoIterator<Item = u8>) -> Self {
        let mut days = Weekdays::empty();
        for index in indices {
            if index < 7 {
                days.0 |= 1 << index;
            } else {
                tracing::warn!(index, "ignoring out-of-range weekday index");
            }
        }
        days
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_sunday();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Sorted 0=Sunday..6=Saturday indices.
    pub fn indices(&self) -> Vec<u8> {
        (0..7).filter(|i| self.0 & (1 << i) != 0).collect()
    }

    /// Monday-first, the order the week view uses.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(|d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for Weekdays {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut days = Weekdays::empty();
        for day in iter {
            days.insert(day);
        }
        days
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        f.write_str(&names.join(", "))
    }
}

/// How an event repeats. Only `Weekly` carries extra data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly { days: Weekdays },
    Monthly,
    /// A stored tag this version does not understand. Never occurs.
    Other(String),
}

impl Recurrence {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }

    /// The tag used on disk.
    pub fn tag(&self) -> &str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly { .. } => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Other(tag) => tag,
        }
    }

    /// Rebuild from the on-disk tag and weekday list.
    pub fn from_parts(tag: Option<&str>, days: Option<&[u8]>) -> Self {
        match tag.map(str::trim) {
            None | Some("") | Some("none") => Recurrence::None,
            Some("daily") => Recurrence::Daily,
            Some("weekly") => Recurrence::Weekly {
                days: Weekdays::from_indices(days.unwrap_or_default().iter().copied()),
            },
            Some("monthly") => Recurrence::Monthly,
            Some(other) => {
                tracing::warn!(recurrence = other, "unknown recurrence, event will not repeat");
                Recurrence::Other(other.to_string())
            }
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Weekly { days } if !days.is_empty() => write!(f, "weekly on {days}"),
            Recurrence::Monthly => f.write_str("monthly on the same day"),
            other => f.write_str(other.tag()),
        }
    }
}

/// A calendar event. `start`/`end` describe the base occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord", into = "EventRecord")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub category: Category,
    pub recurrence: Recurrence,
}

impl Event {
    /// Create a new one-off event with a fresh id.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> DayCalResult<Self> {
        let event = Event {
            id: EventId::new(),
            title: title.into(),
            description: None,
            start,
            end,
            category: Category::default(),
            recurrence: Recurrence::None,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Checks the invariants enforced on create and edit.
    pub fn validate(&self) -> DayCalResult<()> {
        if self.title.trim().is_empty() {
            return Err(DayCalError::InvalidEvent("title must not be empty".into()));
        }
        if self.end <= self.start {
            return Err(DayCalError::InvalidEvent(format!(
                "end {} must be after start {}",
                self.end.format("%Y-%m-%d %H:%M"),
                self.start.format("%Y-%m-%d %H:%M")
            )));
        }
        Ok(())
    }

    /// The base occurrence. Fails for records stored with `end < start`.
    pub fn interval(&self) -> Result<Interval, IntervalError> {
        Interval::new(self.start, self.end)
    }

    /// Length of the base occurrence, truncated to whole minutes.
    pub fn duration(&self) -> Duration {
        Duration::minutes((self.end - self.start).num_minutes())
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    /// Only one-off events can be dragged to another day.
    pub fn is_movable(&self) -> bool {
        !self.is_recurring()
    }

    /// Day of month of the base start (monthly recurrence anchor).
    pub fn anchor_day(&self) -> u32 {
        self.start.day()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// The persisted shape of an [`Event`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub recurrence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_days_of_week: Option<Vec<u8>>,
    #[serde(default)]
    pub category: Category,
}

impl TryFrom<EventRecord> for Event {
    type Error = DayCalError;

    /// Fails only when the id or a timestamp cannot be parsed. A record
    /// with `end < start` still converts; the engine skips it with a warning.
    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let recurrence = Recurrence::from_parts(
            record.recurrence.as_deref(),
            record.selected_days_of_week.as_deref(),
        );
        Ok(Event {
            id: record.id.parse()?,
            title: record.title,
            description: record.description.filter(|d| !d.is_empty()),
            start: parse_timestamp(&record.start)?,
            end: parse_timestamp(&record.end)?,
            category: record.category,
            recurrence,
        })
    }
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        let selected_days_of_week = match &event.recurrence {
            Recurrence::Weekly { days } => Some(days.indices()),
            _ => None,
        };
        EventRecord {
            id: event.id.to_string(),
            title: event.title,
            description: event.description,
            start: format_timestamp(&event.start),
            end: format_timestamp(&event.end),
            recurrence: Some(event.recurrence.tag().to_string()),
            selected_days_of_week,
            category: event.category,
        }
    }
}
