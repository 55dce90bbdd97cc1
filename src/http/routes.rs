//! Handler functions for the task API.

use super::dto::{CompleteTaskBody, CreateTaskBody, TaskResponse, UpdateTaskBody};
use super::{ApiError, ApiResult, AppState};
use crate::event::ports::EventPublisher;
use crate::task::{
    domain::TaskId,
    ports::TaskRepository,
    services::{Actor, CreateTaskRequest, UpdateTaskRequest},
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mockable::Clock;
use uuid::Uuid;

fn actor_from(user_id: Option<String>, user_email: Option<String>) -> Actor {
    let mut actor = Actor::anonymous();
    if let Some(user_id) = user_id {
        actor = actor.with_user_id(user_id);
    }
    if let Some(user_email) = user_email {
        actor = actor.with_email(user_email);
    }
    actor
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("task {id} not found"))
}

/// `POST /tasks`
pub async fn create_task<R, P, C>(
    State(state): State<AppState<R, P, C>>,
    Json(body): Json<CreateTaskBody>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    if body.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_owned()));
    }
    let request = CreateTaskRequest::new(body.title)
        .with_description(body.description)
        .with_actor(actor_from(body.user_id, body.user_email));
    let mutation = state.service().create_task(request).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&mutation.task))))
}

/// `GET /tasks`
pub async fn list_tasks<R, P, C>(
    State(state): State<AppState<R, P, C>>,
) -> ApiResult<Json<Vec<TaskResponse>>>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    let tasks = state.service().list_tasks().await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// `GET /tasks/{id}`
pub async fn get_task<R, P, C>(
    State(state): State<AppState<R, P, C>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    let task = state
        .service()
        .get_task(TaskId::from_uuid(id))
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `PUT /tasks/{id}`
pub async fn update_task<R, P, C>(
    State(state): State<AppState<R, P, C>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTaskBody>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    let mut request = UpdateTaskRequest::new();
    if let Some(title) = body.title {
        request = request.with_title(title);
    }
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    let task = state
        .service()
        .update_task(TaskId::from_uuid(id), request)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `DELETE /tasks/{id}`
pub async fn delete_task<R, P, C>(
    State(state): State<AppState<R, P, C>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    let deleted = state.service().delete_task(TaskId::from_uuid(id)).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// `PATCH /tasks/{id}/complete`
pub async fn complete_task<R, P, C>(
    State(state): State<AppState<R, P, C>>,
    Path(id): Path<Uuid>,
    body: Option<Json<CompleteTaskBody>>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    let body = body.map(|Json(inner)| inner).unwrap_or_default();
    let actor = actor_from(body.user_id, body.user_email);
    let mutation = state
        .service()
        .complete_task(TaskId::from_uuid(id), actor)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(TaskResponse::from(&mutation.task)))
}
