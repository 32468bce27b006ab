//! Error types for the agenda backend.

use thiserror::Error;

/// Errors surfaced by the event service and record store.
#[derive(Error, Debug)]
pub enum AgendaError {
    /// Update/delete targeting an event that does not exist or is owned by
    /// a different user. The two cases are indistinguishable to callers.
    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Invalid event id: {0}")]
    InvalidId(String),

    #[error("Store unavailable: {0}")]
    Store(String),
}

impl From<mongodb::error::Error> for AgendaError {
    fn from(err: mongodb::error::Error) -> Self {
        AgendaError::Store(err.to_string())
    }
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
