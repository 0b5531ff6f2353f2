//! Core engine for daycal.
//!
//! Everything here is pure: functions take a snapshot of events and return
//! decisions or derived views. Storage and rendering live in the CLI.
//! - `event`: the event model and its persisted record shape
//! - `recurrence`: projecting a recurring event onto a day
//! - `occurrence`: which events occur on a day, for the calendar views
//! - `conflict`: the overlap check run before create, edit and move

pub mod conflict;
pub mod date_range;
pub mod error;
pub mod event;
pub mod filter;
pub mod interval;
pub mod occurrence;
pub mod recurrence;
pub mod reschedule;

pub use conflict::{find_conflict, has_conflict};
pub use date_range::DateRange;
pub use error::{DayCalError, DayCalResult};
pub use event::{Category, Event, EventId, EventRecord, Recurrence, Weekdays};
pub use filter::EventFilter;
pub use interval::{Interval, overlaps};
pub use occurrence::{Clip, Occurrence, Placement, occurrences_in, occurrences_on, occurs_on};
pub use recurrence::project;
pub use reschedule::rescheduled_to;
