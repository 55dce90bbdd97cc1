//! Domain event envelope and typed payloads.

mod envelope;
mod error;
mod payload;

pub use envelope::{DomainEvent, EventSource, EventType};
pub use error::EventDomainError;
pub use payload::{TaskCompletionDetail, TaskCreationDetail, UserRegistrationDetail};
