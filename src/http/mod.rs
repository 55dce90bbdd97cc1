//! Inbound HTTP adapter exposing the task API.
//!
//! Wiring is explicit: callers construct the application state once at
//! process start and hand it to [`router`]; nothing is built at module load
//! time.

pub mod dto;
pub mod error;
mod routes;

pub use error::{ApiError, ApiResult};

use crate::event::ports::EventPublisher;
use crate::task::{ports::TaskRepository, services::TaskService};
use axum::routing::{get, patch};
use axum::Router;
use mockable::Clock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state injected into every handler.
pub struct AppState<R, P, C>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    service: Arc<TaskService<R, P, C>>,
}

impl<R, P, C> AppState<R, P, C>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates state around an already-wired task service.
    #[must_use]
    pub const fn new(service: Arc<TaskService<R, P, C>>) -> Self {
        Self { service }
    }

    /// Returns the task service.
    #[must_use]
    pub fn service(&self) -> &TaskService<R, P, C> {
        &self.service
    }
}

impl<R, P, C> Clone for AppState<R, P, C>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Builds the task API router over the given state.
#[must_use]
pub fn router<R, P, C>(state: AppState<R, P, C>) -> Router
where
    R: TaskRepository + 'static,
    P: EventPublisher + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/tasks",
            get(routes::list_tasks::<R, P, C>).post(routes::create_task::<R, P, C>),
        )
        .route(
            "/tasks/:id",
            get(routes::get_task::<R, P, C>)
                .put(routes::update_task::<R, P, C>)
                .delete(routes::delete_task::<R, P, C>),
        )
        .route(
            "/tasks/:id/complete",
            patch(routes::complete_task::<R, P, C>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
