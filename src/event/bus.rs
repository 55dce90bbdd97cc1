//! Rule-routed event bus and the publisher adapter feeding it.
//!
//! Each rule is a static predicate over `(source, event type)` bound to
//! exactly one handler. Rules do not overlap by construction; each event is
//! dispatched independently with no ordering guarantee between events.

use crate::event::domain::{DomainEvent, EventSource, EventType};
use crate::event::ports::{EventPublishError, EventPublisher};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Static predicate matching events by source and type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRule {
    source: EventSource,
    event_type: EventType,
}

impl EventRule {
    /// Creates a rule matching the given source and event type.
    #[must_use]
    pub const fn new(source: EventSource, event_type: EventType) -> Self {
        Self { source, event_type }
    }

    /// Returns whether the rule matches the event.
    #[must_use]
    pub fn matches(&self, event: &DomainEvent) -> bool {
        self.source == *event.source() && self.event_type == event.event_type()
    }
}

/// Error surfaced when a subscribed handler fails.
///
/// Propagates to the dispatching caller, which owns any retry policy.
#[derive(Debug, Clone, Error)]
#[error("handler failed for {event_type} event: {cause}")]
pub struct DispatchError {
    event_type: EventType,
    cause: Arc<dyn std::error::Error + Send + Sync>,
}

impl DispatchError {
    /// Wraps a handler failure for the given event type.
    #[must_use]
    pub fn handler(
        event_type: EventType,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            event_type,
            cause: Arc::new(err),
        }
    }

    /// Returns the type of the event whose handling failed.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        self.event_type
    }
}

/// Subscriber contract invoked for events matching a bound rule.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handles one dispatched event.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when processing fails; the bus surfaces
    /// the error to the dispatching caller unmodified.
    async fn handle(&self, event: &DomainEvent) -> Result<(), DispatchError>;
}

struct RuleBinding {
    rule: EventRule,
    handler: Arc<dyn EventHandler>,
}

/// In-process pub/sub router matching events to handlers by rule.
pub struct EventBus {
    name: String,
    bindings: Vec<RuleBinding>,
}

impl EventBus {
    /// Creates an empty bus with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: Vec::new(),
        }
    }

    /// Creates a bus carrying the standard notification rule set: the three
    /// `(source, event type)` pairs all bound to the given handler.
    #[must_use]
    pub fn with_notification_rules(name: impl Into<String>, handler: Arc<dyn EventHandler>) -> Self {
        Self::new(name)
            .bind(
                EventRule::new(EventSource::auth(), EventType::UserRegistration),
                Arc::clone(&handler),
            )
            .bind(
                EventRule::new(EventSource::tasks(), EventType::TaskCreation),
                Arc::clone(&handler),
            )
            .bind(
                EventRule::new(EventSource::tasks(), EventType::TaskCompletion),
                handler,
            )
    }

    /// Binds a rule to a handler.
    #[must_use]
    pub fn bind(mut self, rule: EventRule, handler: Arc<dyn EventHandler>) -> Self {
        self.bindings.push(RuleBinding { rule, handler });
        self
    }

    /// Returns the bus name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of bound rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.bindings.len()
    }

    /// Dispatches one event to every handler whose rule matches, awaiting
    /// each sequentially. Returns the number of handlers invoked.
    ///
    /// An event matching no rule is dropped with a debug log.
    ///
    /// # Errors
    ///
    /// Returns the first [`DispatchError`] raised by a handler.
    pub async fn dispatch(&self, event: &DomainEvent) -> Result<usize, DispatchError> {
        let mut invoked = 0;
        for binding in &self.bindings {
            if binding.rule.matches(event) {
                binding.handler.handle(event).await?;
                invoked += 1;
            }
        }
        if invoked == 0 {
            tracing::debug!(
                bus = %self.name,
                source = %event.source(),
                event_type = %event.event_type(),
                "event matched no rule, dropping"
            );
        }
        Ok(invoked)
    }
}

/// Publisher adapter delivering events into the local bus.
///
/// Translates the port contract into a single dispatch call; a handler
/// failure during dispatch surfaces as a delivery error.
#[derive(Clone)]
pub struct BusPublisher {
    bus: Arc<EventBus>,
}

impl BusPublisher {
    /// Creates a publisher backed by the given bus.
    #[must_use]
    pub const fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl EventPublisher for BusPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), EventPublishError> {
        self.bus
            .dispatch(event)
            .await
            .map(|_| ())
            .map_err(|error| EventPublishError::Delivery {
                message: error.to_string(),
            })
    }
}
