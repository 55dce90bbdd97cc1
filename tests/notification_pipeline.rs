//! Full pipeline tests: service mutation → bus publisher → rule match →
//! notification handler → recorded email.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use chrono::{Offset, Utc};
use mockable::DefaultClock;
use serde_json::json;
use taskapp::event::bus::{BusPublisher, EventBus, EventHandler};
use taskapp::event::domain::{DomainEvent, EventSource, EventType};
use taskapp::notification::adapters::RecordingEmailSender;
use taskapp::notification::handler::NotificationHandler;
use taskapp::notification::render::EmailRenderer;
use taskapp::task::adapters::memory::InMemoryTaskRepository;
use taskapp::task::services::{Actor, CreateTaskRequest, TaskService};

const SENDER: &str = "notifications@taskapp.example";

struct Pipeline {
    service: TaskService<InMemoryTaskRepository, BusPublisher, DefaultClock>,
    bus: Arc<EventBus>,
    emails: RecordingEmailSender,
}

fn pipeline() -> Pipeline {
    let emails = RecordingEmailSender::new();
    let renderer = EmailRenderer::new(Utc.fix(), "%Y-%m-%d %H:%M").expect("templates compile");
    let handler = Arc::new(NotificationHandler::new(
        Arc::new(emails.clone()),
        renderer,
        SENDER,
    ));
    let bus = Arc::new(EventBus::with_notification_rules(
        "taskapp-events",
        handler as Arc<dyn EventHandler>,
    ));
    let service = TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
    .with_publisher(Arc::new(BusPublisher::new(Arc::clone(&bus))));
    Pipeline {
        service,
        bus,
        emails,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn creating_a_task_with_an_address_delivers_a_creation_email() {
    let pipeline = pipeline();

    let mutation = pipeline
        .service
        .create_task(
            CreateTaskRequest::new("Water plants")
                .with_description("the ferns too")
                .with_actor(Actor::anonymous().with_email("green@thumb.io")),
        )
        .await
        .expect("creation should succeed");
    assert!(mutation.publish.is_delivered());

    let sent = pipeline.emails.sent();
    assert_eq!(sent.len(), 1);
    let message = sent.first().expect("one message");
    assert_eq!(message.to(), "green@thumb.io");
    assert_eq!(message.subject(), "New task: Water plants");
    assert!(message.body().contains(&mutation.task.id().to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn completing_a_task_delivers_a_completion_email() {
    let pipeline = pipeline();

    let created = pipeline
        .service
        .create_task(CreateTaskRequest::new("Ship it"))
        .await
        .expect("creation should succeed");
    // Creation without an address reaches the handler and is skipped.
    assert!(pipeline.emails.sent().is_empty());

    pipeline
        .service
        .complete_task(
            created.task.id(),
            Actor::anonymous().with_email("captain@example.com"),
        )
        .await
        .expect("completion should succeed")
        .expect("task exists");

    let sent = pipeline.emails.sent();
    assert_eq!(sent.len(), 1);
    let message = sent.first().expect("one message");
    assert_eq!(message.to(), "captain@example.com");
    assert_eq!(message.subject(), "Task completed: Ship it");
    assert!(message.is_html());
}

#[tokio::test(flavor = "multi_thread")]
async fn registration_events_from_the_auth_boundary_are_routed() {
    let pipeline = pipeline();

    let event = DomainEvent::new(
        EventSource::auth(),
        EventType::UserRegistration,
        json!({"username": "alice", "email": "alice@example.com"}),
    );
    let invoked = pipeline
        .bus
        .dispatch(&event)
        .await
        .expect("dispatch should succeed");
    assert_eq!(invoked, 1);

    let sent = pipeline.emails.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent.first().map(|message| message.subject().to_owned()),
        Some("Welcome to TaskApp, alice!".to_owned())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn events_without_addresses_produce_no_email() {
    let pipeline = pipeline();

    pipeline
        .service
        .create_task(CreateTaskRequest::new("Quiet task"))
        .await
        .expect("creation should succeed");
    let created = pipeline
        .service
        .create_task(CreateTaskRequest::new("Another quiet task"))
        .await
        .expect("creation should succeed");
    pipeline
        .service
        .complete_task(created.task.id(), Actor::anonymous())
        .await
        .expect("completion should succeed")
        .expect("task exists");

    assert!(pipeline.emails.sent().is_empty());
}
