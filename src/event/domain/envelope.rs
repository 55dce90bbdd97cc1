//! Event envelope: source namespace, event type, free-form detail.

use super::EventDomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Dotted-namespace source identifier for published events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventSource(String);

impl EventSource {
    /// Source namespace for task lifecycle events.
    pub const TASKS: &'static str = "com.taskapp.tasks";
    /// Source namespace for authentication events.
    pub const AUTH: &'static str = "com.taskapp.auth";

    /// Creates a validated event source.
    ///
    /// # Errors
    ///
    /// Returns [`EventDomainError::InvalidSource`] when the value is not a
    /// dot-separated sequence of non-empty lowercase alphanumeric segments.
    pub fn new(value: impl Into<String>) -> Result<Self, EventDomainError> {
        let raw = value.into();
        let is_valid = !raw.is_empty()
            && raw.split('.').all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
            });
        if !is_valid {
            return Err(EventDomainError::InvalidSource(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the task lifecycle source.
    #[must_use]
    pub fn tasks() -> Self {
        Self(Self::TASKS.to_owned())
    }

    /// Returns the authentication source.
    #[must_use]
    pub fn auth() -> Self {
        Self(Self::AUTH.to_owned())
    }

    /// Returns the source as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EventSource {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The set of domain event types carried on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A user registered with the identity provider.
    UserRegistration,
    /// A task was created.
    TaskCreation,
    /// A task was completed.
    TaskCompletion,
}

impl EventType {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserRegistration => "UserRegistration",
            Self::TaskCreation => "TaskCreation",
            Self::TaskCompletion => "TaskCompletion",
        }
    }
}

impl TryFrom<&str> for EventType {
    type Error = EventDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "UserRegistration" => Ok(Self::UserRegistration),
            "TaskCreation" => Ok(Self::TaskCreation),
            "TaskCompletion" => Ok(Self::TaskCompletion),
            _ => Err(EventDomainError::UnknownEventType(value.to_owned())),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A domain event as handed to the publisher port.
///
/// The detail payload is free-form JSON specific to the event type; the
/// notification renderers define which fields they require. Events carry no
/// identity after dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent {
    source: EventSource,
    event_type: EventType,
    detail: Value,
}

impl DomainEvent {
    /// Creates an event from an already-shaped detail value.
    #[must_use]
    pub const fn new(source: EventSource, event_type: EventType, detail: Value) -> Self {
        Self {
            source,
            event_type,
            detail,
        }
    }

    /// Creates an event by serializing a typed payload into the detail.
    ///
    /// # Errors
    ///
    /// Returns [`EventDomainError::Payload`] when serialization fails.
    pub fn from_payload<T: Serialize>(
        source: EventSource,
        event_type: EventType,
        payload: &T,
    ) -> Result<Self, EventDomainError> {
        let detail = serde_json::to_value(payload)
            .map_err(|error| EventDomainError::Payload(error.to_string()))?;
        Ok(Self::new(source, event_type, detail))
    }

    /// Returns the source namespace.
    #[must_use]
    pub const fn source(&self) -> &EventSource {
        &self.source
    }

    /// Returns the event type.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Returns the free-form detail payload.
    #[must_use]
    pub const fn detail(&self) -> &Value {
        &self.detail
    }
}
