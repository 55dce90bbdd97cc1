//! Service orchestration tests for task lifecycle operations.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use crate::event::adapters::memory::{CapturingPublisher, FailingPublisher};
use crate::event::domain::{EventSource, EventType};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{
        Actor, CreateTaskRequest, PublishOutcome, TaskService, TaskServiceError, UpdateTaskRequest,
    },
};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskService<InMemoryTaskRepository, CapturingPublisher, DefaultClock>;

struct Harness {
    service: TestService,
    publisher: CapturingPublisher,
}

#[fixture]
fn harness() -> Harness {
    let publisher = CapturingPublisher::new();
    let service = TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
    .with_publisher(Arc::new(publisher.clone()));
    Harness { service, publisher }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_persists_and_publishes_creation_event(harness: Harness) {
    let request = CreateTaskRequest::new("Buy milk")
        .with_description("")
        .with_actor(Actor::anonymous().with_user_id("u1").with_email("u1@x.com"));

    let mutation = harness
        .service
        .create_task(request)
        .await
        .expect("creation should succeed");
    assert!(mutation.publish.is_delivered());
    assert!(!mutation.task.completed());
    assert_eq!(mutation.task.created_at(), mutation.task.updated_at());

    let fetched = harness
        .service
        .get_task(mutation.task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(mutation.task.clone()));

    let events = harness.publisher.recorded();
    assert_eq!(events.len(), 1);
    let event = events.first().expect("one event");
    assert_eq!(event.source(), &EventSource::tasks());
    assert_eq!(event.event_type(), EventType::TaskCreation);
    assert_eq!(
        event.detail().get("taskId").and_then(|v| v.as_str()),
        Some(mutation.task.id().to_string().as_str())
    );
    assert_eq!(
        event.detail().get("title").and_then(|v| v.as_str()),
        Some("Buy milk")
    );
    assert_eq!(
        event.detail().get("description").and_then(|v| v.as_str()),
        Some("")
    );
    assert_eq!(
        event.detail().get("userId").and_then(|v| v.as_str()),
        Some("u1")
    );
    assert_eq!(
        event.detail().get("userEmail").and_then(|v| v.as_str()),
        Some("u1@x.com")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_without_publisher_reports_skipped() {
    let service: TestService = TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    );

    let mutation = service
        .create_task(CreateTaskRequest::new("No publisher"))
        .await
        .expect("creation should succeed");
    assert!(matches!(mutation.publish, PublishOutcome::Skipped));
}

#[tokio::test(flavor = "multi_thread")]
async fn publisher_failure_does_not_prevent_persistence() {
    let service = TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
    .with_publisher(Arc::new(FailingPublisher::default()));

    let mutation = service
        .create_task(CreateTaskRequest::new("Still created"))
        .await
        .expect("creation should succeed despite publish failure");
    assert!(matches!(mutation.publish, PublishOutcome::Failed(_)));

    let fetched = service
        .get_task(mutation.task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched.map(|task| task.id()), Some(mutation.task.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_task_returns_equal_snapshots_without_mutation(harness: Harness) {
    let mutation = harness
        .service
        .create_task(CreateTaskRequest::new("Stable"))
        .await
        .expect("creation should succeed");

    let first = harness
        .service
        .get_task(mutation.task.id())
        .await
        .expect("first lookup");
    let second = harness
        .service
        .get_task(mutation.task.id())
        .await
        .expect("second lookup");
    assert_eq!(first, second);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn complete_task_is_one_way_and_publishes_completion(harness: Harness) {
    let created = harness
        .service
        .create_task(CreateTaskRequest::new("Ship it"))
        .await
        .expect("creation should succeed");

    let completed = harness
        .service
        .complete_task(created.task.id(), Actor::anonymous().with_email("a@b.com"))
        .await
        .expect("completion should succeed")
        .expect("task exists");
    assert!(completed.task.completed());
    assert!(completed.task.updated_at() > completed.task.created_at());

    // Re-completing is permitted and leaves the flag set.
    let again = harness
        .service
        .complete_task(created.task.id(), Actor::anonymous())
        .await
        .expect("second completion should succeed")
        .expect("task exists");
    assert!(again.task.completed());

    let events = harness.publisher.recorded();
    let completions: Vec<_> = events
        .iter()
        .filter(|event| event.event_type() == EventType::TaskCompletion)
        .collect();
    assert_eq!(completions.len(), 2);
    let first = completions.first().expect("completion event");
    assert_eq!(
        first.detail().get("userEmail").and_then(|v| v.as_str()),
        Some("a@b.com")
    );
    assert!(first.detail().get("completedAt").is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn complete_task_returns_none_for_unknown_id(harness: Harness) {
    let result = harness
        .service
        .complete_task(TaskId::new(), Actor::anonymous())
        .await
        .expect("completion should not error");
    assert!(result.is_none());
    assert!(harness.publisher.recorded().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_task_applies_only_supplied_fields(harness: Harness) {
    let created = harness
        .service
        .create_task(CreateTaskRequest::new("Original").with_description("keep me"))
        .await
        .expect("creation should succeed");

    let updated = harness
        .service
        .update_task(
            created.task.id(),
            UpdateTaskRequest::new().with_title("Renamed"),
        )
        .await
        .expect("update should succeed")
        .expect("task exists");
    assert_eq!(updated.title(), "Renamed");
    assert_eq!(updated.description(), "keep me");

    // An explicitly empty description is a deliberate clear, not "omitted".
    let cleared = harness
        .service
        .update_task(
            created.task.id(),
            UpdateTaskRequest::new().with_description(""),
        )
        .await
        .expect("update should succeed")
        .expect("task exists");
    assert_eq!(cleared.title(), "Renamed");
    assert_eq!(cleared.description(), "");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_task_rejects_empty_title(harness: Harness) {
    let created = harness
        .service
        .create_task(CreateTaskRequest::new("Has title"))
        .await
        .expect("creation should succeed");

    let result = harness
        .service
        .update_task(created.task.id(), UpdateTaskRequest::new().with_title(""))
        .await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Domain(TaskDomainError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_task_then_get_returns_none(harness: Harness) {
    let created = harness
        .service
        .create_task(CreateTaskRequest::new("Doomed"))
        .await
        .expect("creation should succeed");

    let deleted = harness
        .service
        .delete_task(created.task.id())
        .await
        .expect("deletion should succeed");
    assert!(deleted);

    let fetched = harness
        .service
        .get_task(created.task.id())
        .await
        .expect("lookup should succeed");
    assert!(fetched.is_none());

    let second_delete = harness
        .service
        .delete_task(created.task.id())
        .await
        .expect("second deletion should not error");
    assert!(!second_delete);
}

mockall::mock! {
    Repo {}

    #[async_trait]
    impl TaskRepository for Repo {
        async fn save(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>>;
        async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn repository_failure_is_fatal_to_the_operation() {
    let mut repo = MockRepo::new();
    repo.expect_save().returning(|_| {
        Err(TaskRepositoryError::persistence(std::io::Error::other(
            "store offline",
        )))
    });

    let service: TaskService<MockRepo, CapturingPublisher, DefaultClock> =
        TaskService::new(Arc::new(repo), Arc::new(DefaultClock));
    let result = service.create_task(CreateTaskRequest::new("Unlucky")).await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Repository(
            TaskRepositoryError::Persistence(_)
        ))
    ));
}
