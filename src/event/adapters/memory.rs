//! In-memory publishers for tests and local wiring.

use crate::event::domain::DomainEvent;
use crate::event::ports::{EventPublishError, EventPublisher};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Publisher that records every published event.
#[derive(Debug, Clone, Default)]
pub struct CapturingPublisher {
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl CapturingPublisher {
    /// Creates an empty capturing publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the events published so far.
    #[must_use]
    pub fn recorded(&self) -> Vec<DomainEvent> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventPublisher for CapturingPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), EventPublishError> {
        let mut events = self
            .events
            .write()
            .map_err(|error| EventPublishError::Delivery {
                message: error.to_string(),
            })?;
        events.push(event.clone());
        Ok(())
    }
}

/// Publisher that fails every delivery attempt.
#[derive(Debug, Clone)]
pub struct FailingPublisher {
    message: String,
}

impl FailingPublisher {
    /// Creates a publisher failing with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingPublisher {
    fn default() -> Self {
        Self::new("event bus unavailable")
    }
}

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: &DomainEvent) -> Result<(), EventPublishError> {
        Err(EventPublishError::Delivery {
            message: self.message.clone(),
        })
    }
}
