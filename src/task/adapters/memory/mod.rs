//! In-memory adapters for the task ports.

mod task;

pub use task::InMemoryTaskRepository;
