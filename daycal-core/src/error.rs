//! Error types for daycal.

use thiserror::Error;

/// Errors that can occur in daycal operations.
///
/// The engine itself (projection, occurrence filtering, conflict checks)
/// never fails; these come from building events and from the store.
#[derive(Error, Debug)]
pub enum DayCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid timestamp '{0}'. Expected YYYY-MM-DDTHH:MM[:SS]")]
    InvalidTimestamp(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Event id '{0}' is ambiguous, use more characters")]
    AmbiguousEventId(String),

    #[error("This event conflicts with '{title}'. Please choose a different time.")]
    Conflict { title: String },

    #[error("Recurring event '{0}' cannot be moved, edit it instead")]
    NotMovable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for daycal operations.
pub type DayCalResult<T> = Result<T, DayCalError>;
