//! Error types for the party book.

use crate::types::{Amount, ContactId, EventDate};
use thiserror::Error;

/// Coarse classification of a [`BookError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value failed its own format or range rules.
    Validation,
    /// An add or rename collided with an existing identity.
    DuplicateEntity,
    /// An index or identifier did not resolve.
    Reference,
    /// A budget, assignment or schedule rule would be broken.
    InvariantViolation,
    /// Persisted data failed its integrity check.
    CorruptedState,
    /// Reading, writing or (de)serializing failed.
    Io,
}

/// Main error type for book operations.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("At least one field to edit must be provided")]
    NothingToEdit,

    #[error("Party {name} is scheduled in the past ({date} {time})")]
    EventInPast {
        name: String,
        date: String,
        time: String,
    },

    #[error("Contact already exists: {0}")]
    DuplicateContact(String),

    #[error("Party already exists: {0}")]
    DuplicateEvent(String),

    #[error("Contact index {index} is out of range (showing {len} contacts)")]
    InvalidContactIndex { index: usize, len: usize },

    #[error("Party index {index} is out of range (showing {len} parties)")]
    InvalidEventIndex { index: usize, len: usize },

    #[error("Contact not found: {0}")]
    ContactNotFound(ContactId),

    #[error("Party not found: {0}")]
    EventNotFound(String),

    #[error("{contact} has already been assigned to party {event}")]
    AlreadyAssigned { contact: String, event: String },

    #[error("{contact} is not assigned to party {event}")]
    NotAssigned { contact: String, event: String },

    #[error("The budget of {contact} ({budget}) exceeds the remaining budget of party {event} ({remaining})")]
    BudgetExceeded {
        contact: String,
        event: String,
        budget: Amount,
        remaining: Amount,
    },

    #[error("{contact} is already assigned to party {other} on {date}")]
    ScheduleConflict {
        contact: String,
        other: String,
        date: EventDate,
    },

    #[error("New budget {budget} is below the {spent} already allocated to participants")]
    BudgetBelowSpent { budget: Amount, spent: Amount },

    #[error("No command to undo")]
    NothingToUndo,

    #[error("Corruption detected: {0}")]
    Corruption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl BookError {
    /// Shorthand for a value that failed validation.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        BookError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// Which part of the taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookError::InvalidValue { .. }
            | BookError::NothingToEdit
            | BookError::EventInPast { .. } => ErrorKind::Validation,

            BookError::DuplicateContact(_) | BookError::DuplicateEvent(_) => {
                ErrorKind::DuplicateEntity
            }

            BookError::InvalidContactIndex { .. }
            | BookError::InvalidEventIndex { .. }
            | BookError::ContactNotFound(_)
            | BookError::EventNotFound(_) => ErrorKind::Reference,

            BookError::AlreadyAssigned { .. }
            | BookError::NotAssigned { .. }
            | BookError::BudgetExceeded { .. }
            | BookError::ScheduleConflict { .. }
            | BookError::BudgetBelowSpent { .. }
            | BookError::NothingToUndo => ErrorKind::InvariantViolation,

            BookError::Corruption(_) => ErrorKind::CorruptedState,

            BookError::Io(_)
            | BookError::Serialization(_)
            | BookError::Deserialization(_)
            | BookError::InvalidFormat(_) => ErrorKind::Io,
        }
    }
}

impl From<serde_json::Error> for BookError {
    fn from(e: serde_json::Error) -> Self {
        BookError::Serialization(e.to_string())
    }
}

/// Result type for book operations.
pub type Result<T> = std::result::Result<T, BookError>;
