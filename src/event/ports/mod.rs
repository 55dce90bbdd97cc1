//! Port contracts for event propagation.

mod publisher;

pub use publisher::{EventPublishError, EventPublisher};
