//! Task orchestration service.
//!
//! Mediates between the task entity and its two dependents: the repository
//! and the event publisher. Repository failures are fatal to the operation;
//! publish failures are best-effort and never fail the primary operation.

use crate::event::domain::{
    DomainEvent, EventSource, EventType, TaskCompletionDetail, TaskCreationDetail,
};
use crate::event::ports::{EventPublishError, EventPublisher};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Identity of the user on whose behalf an operation runs.
///
/// Both fields are optional; a missing email address means the resulting
/// notification is skipped rather than failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    user_id: Option<String>,
    user_email: Option<String>,
}

impl Actor {
    /// Creates an actor with neither identifier nor address.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user_id: None,
            user_email: None,
        }
    }

    /// Sets the acting user identifier.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Sets the acting user's email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    /// Returns the acting user identifier, when known.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Returns the acting user's email address, when known.
    #[must_use]
    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    actor: Actor,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            actor: Actor::anonymous(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the acting user.
    #[must_use]
    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = actor;
        self
    }
}

/// Request payload for a partial task update.
///
/// `None` leaves a field untouched; `Some` replaces it. An explicitly empty
/// description is a valid update that clears the field, while an empty
/// title is rejected by the domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request changing nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: None,
        }
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Outcome of the best-effort event publication accompanying a mutation.
#[derive(Debug, Clone)]
pub enum PublishOutcome {
    /// The publisher accepted the event.
    Delivered,
    /// No publisher is configured; nothing was attempted.
    Skipped,
    /// The publish attempt failed and the failure was swallowed.
    Failed(EventPublishError),
}

impl PublishOutcome {
    /// Returns whether the event reached the publisher.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// A mutated task together with the publish outcome of its event.
#[derive(Debug, Clone)]
pub struct TaskMutation {
    /// The task after the mutation was persisted.
    pub task: Task,
    /// Best-effort publish outcome for the accompanying event.
    pub publish: PublishOutcome,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<R, P, C>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    publisher: Option<Arc<P>>,
    clock: Arc<C>,
}

impl<R, P, C> TaskService<R, P, C>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a service without a publisher; mutations report
    /// [`PublishOutcome::Skipped`].
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            publisher: None,
            clock,
        }
    }

    /// Attaches an event publisher.
    #[must_use]
    pub fn with_publisher(mut self, publisher: Arc<P>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Creates and persists a new task, then publishes a `TaskCreation`
    /// event best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence fails.
    /// Publish failures never fail the operation; they are logged and
    /// reported through [`TaskMutation::publish`].
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<TaskMutation> {
        let task = Task::new(request.title, request.description, &*self.clock);
        self.repository.save(&task).await?;

        let detail = TaskCreationDetail {
            task_id: task.id().to_string(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            user_id: request.actor.user_id.clone(),
            user_email: request.actor.user_email.clone(),
        };
        let publish = self
            .publish_best_effort(EventType::TaskCreation, &detail)
            .await;
        Ok(TaskMutation { task, publish })
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns an unordered snapshot of every task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.find_all().await?)
    }

    /// Marks a task completed and publishes a `TaskCompletion` event
    /// best-effort. Completing an already-completed task is permitted.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when lookup or persistence
    /// fails.
    pub async fn complete_task(
        &self,
        id: TaskId,
        actor: Actor,
    ) -> TaskServiceResult<Option<TaskMutation>> {
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        task.complete(&*self.clock);
        self.repository.update(&task).await?;

        let detail = TaskCompletionDetail {
            task_id: task.id().to_string(),
            title: task.title().to_owned(),
            completed_at: task.updated_at(),
            user_id: actor.user_id,
            user_email: actor.user_email,
        };
        let publish = self
            .publish_best_effort(EventType::TaskCompletion, &detail)
            .await;
        Ok(Some(TaskMutation { task, publish }))
    }

    /// Applies a partial update to a task. No event is published.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the replacement title is
    /// empty, and [`TaskServiceError::Repository`] when lookup or
    /// persistence fails.
    pub async fn update_task(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Option<Task>> {
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        if let Some(title) = request.title {
            task.rename(title, &*self.clock)?;
        }
        if let Some(description) = request.description {
            task.redescribe(description, &*self.clock);
        }
        self.repository.update(&task).await?;
        Ok(Some(task))
    }

    /// Deletes a task, returning `true` when a record was removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the deletion fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<bool> {
        Ok(self.repository.delete(id).await?)
    }

    /// Publishes a task event, swallowing failures.
    async fn publish_best_effort<T: Serialize>(
        &self,
        event_type: EventType,
        payload: &T,
    ) -> PublishOutcome {
        let Some(publisher) = &self.publisher else {
            return PublishOutcome::Skipped;
        };

        let event = match DomainEvent::from_payload(EventSource::tasks(), event_type, payload) {
            Ok(event) => event,
            Err(error) => {
                tracing::warn!(%event_type, %error, "event payload serialization failed, dropping");
                return PublishOutcome::Failed(EventPublishError::Serialization {
                    message: error.to_string(),
                });
            }
        };

        match publisher.publish(&event).await {
            Ok(()) => PublishOutcome::Delivered,
            Err(error) => {
                tracing::warn!(%event_type, %error, "event publish failed, task state unaffected");
                PublishOutcome::Failed(error)
            }
        }
    }
}
