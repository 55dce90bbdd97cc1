//! Orchestration services for the task module.

mod task_service;

pub use task_service::{
    Actor, CreateTaskRequest, PublishOutcome, TaskMutation, TaskService, TaskServiceError,
    TaskServiceResult, UpdateTaskRequest,
};
