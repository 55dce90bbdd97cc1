//! Port contracts the task module depends on.

pub mod repository;

pub use crate::event::ports::{EventPublishError, EventPublisher};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
