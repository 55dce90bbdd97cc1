//! Error types for event domain values.

use thiserror::Error;

/// Errors returned while constructing domain events.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventDomainError {
    /// The event source is not a dotted lowercase namespace.
    #[error("invalid event source '{0}', expected a dotted namespace")]
    InvalidSource(String),

    /// The event type string is unknown.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    /// The payload could not be serialized into the event detail.
    #[error("event payload serialization failed: {0}")]
    Payload(String),
}
