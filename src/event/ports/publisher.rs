//! Event publisher port.

use crate::event::domain::DomainEvent;
use async_trait::async_trait;
use thiserror::Error;

/// Fire-and-forget event publishing contract.
///
/// A single delivery attempt per call: no batching, no retry, no backoff.
/// A transient failure is a permanent failure for that event, and the only
/// acknowledgment surfaced to the caller is "did not return an error".
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes one event.
    ///
    /// # Errors
    ///
    /// Returns [`EventPublishError`] when serialization or the single
    /// delivery attempt fails.
    async fn publish(&self, event: &DomainEvent) -> Result<(), EventPublishError>;
}

/// Errors returned by event publisher implementations.
#[derive(Debug, Clone, Error)]
pub enum EventPublishError {
    /// The event could not be serialized for the wire.
    #[error("event serialization failed: {message}")]
    Serialization {
        /// Underlying serializer failure.
        message: String,
    },

    /// The delivery attempt failed.
    #[error("event delivery failed: {message}")]
    Delivery {
        /// Underlying transport failure.
        message: String,
    },
}
