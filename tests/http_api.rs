//! HTTP adapter tests driving the router with in-process requests.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mockable::DefaultClock;
use serde_json::{json, Value};
use tower::ServiceExt;

use taskapp::event::adapters::memory::CapturingPublisher;
use taskapp::http::{router, AppState};
use taskapp::task::adapters::memory::InMemoryTaskRepository;
use taskapp::task::services::TaskService;

fn app() -> (Router, CapturingPublisher) {
    let publisher = CapturingPublisher::new();
    let service = Arc::new(
        TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        )
        .with_publisher(Arc::new(publisher.clone())),
    );
    (router(AppState::new(service)), publisher)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn create_task(app: &Router, title: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/tasks",
            json!({"title": title, "description": "", "userEmail": "u@x.com"}),
        ))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test(flavor = "multi_thread")]
async fn post_tasks_creates_and_returns_the_task() {
    let (app, publisher) = app();

    let body = create_task(&app, "Buy milk").await;
    assert_eq!(body.get("title").and_then(Value::as_str), Some("Buy milk"));
    assert_eq!(body.get("completed").and_then(Value::as_bool), Some(false));
    assert!(body.get("id").and_then(Value::as_str).is_some());

    // The creation event was published with the task's identifier.
    let events = publisher.recorded();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events.first().and_then(|e| e.detail().get("taskId")).and_then(Value::as_str),
        body.get("id").and_then(Value::as_str)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn post_tasks_rejects_empty_titles() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request("POST", "/tasks", json!({"title": "  "})))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body.get("message").and_then(Value::as_str).is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_tasks_lists_created_tasks() {
    let (app, _) = app();
    create_task(&app, "one").await;
    create_task(&app, "two").await;

    let response = app
        .oneshot(empty_request("GET", "/tasks"))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let tasks = body.as_array().expect("array body");
    assert_eq!(tasks.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_task_returns_404_with_message_for_unknown_ids() {
    let (app, _) = app();

    let response = app
        .oneshot(empty_request(
            "GET",
            "/tasks/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert!(
        body.get("message")
            .and_then(Value::as_str)
            .is_some_and(|message| message.contains("not found"))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn put_task_applies_partial_updates() {
    let (app, _) = app();
    let created = create_task(&app, "Old title").await;
    let id = created.get("id").and_then(Value::as_str).expect("id");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/tasks/{id}"),
            json!({"title": "New title"}),
        ))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.get("title").and_then(Value::as_str), Some("New title"));
    assert_eq!(body.get("description").and_then(Value::as_str), Some(""));
}

#[tokio::test(flavor = "multi_thread")]
async fn put_task_rejects_empty_replacement_title() {
    let (app, _) = app();
    let created = create_task(&app, "Keep me").await;
    let id = created.get("id").and_then(Value::as_str).expect("id");

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/tasks/{id}"),
            json!({"title": ""}),
        ))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn patch_complete_marks_the_task_completed() {
    let (app, publisher) = app();
    let created = create_task(&app, "Finish line").await;
    let id = created.get("id").and_then(Value::as_str).expect("id");

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/tasks/{id}/complete"),
            json!({"userEmail": "done@example.com"}),
        ))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.get("completed").and_then(Value::as_bool), Some(true));

    // Creation + completion events.
    assert_eq!(publisher.recorded().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_task_returns_204_then_404() {
    let (app, _) = app();
    let created = create_task(&app, "Short lived").await;
    let id = created.get("id").and_then(Value::as_str).expect("id");

    let delete_response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/tasks/{id}")))
        .await
        .expect("request should run");
    assert_eq!(delete_response.status(), StatusCode::NO_CONTENT);

    let get_response = app
        .oneshot(empty_request("GET", &format!("/tasks/{id}")))
        .await
        .expect("request should run");
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_unknown_task_returns_404() {
    let (app, _) = app();

    let response = app
        .oneshot(empty_request(
            "DELETE",
            "/tasks/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .expect("request should run");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
