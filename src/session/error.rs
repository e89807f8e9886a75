//! Error types for the product session.

use thiserror::Error;

use crate::model::{UnknownField, ValidationError};

/// Errors a session command can report.
///
/// None of these are fatal. After any of them the session's current state is
/// still available through [`ProductSession::view`](super::ProductSession::view).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// A required draft field was missing or could not be parsed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The command referenced an id that is not in the collection.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// A draft command was issued while no form is open.
    #[error("No product form is open")]
    NoActiveDraft,

    /// The presentation layer named a field that does not exist.
    #[error(transparent)]
    UnknownField(#[from] UnknownField),

    /// The store rejected the write. The in-memory change stands and the next
    /// mutating command retries.
    #[error("Failed to persist catalog: {0}")]
    PersistenceWriteFailure(String),

    /// The session actor is no longer running.
    #[error("Session actor closed")]
    ActorClosed,

    /// The session actor dropped the response channel.
    #[error("Session actor dropped response channel")]
    ActorDropped,
}
