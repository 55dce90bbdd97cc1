//! Notification handler: event dispatch, rendering, and delivery.

use crate::event::bus::{DispatchError, EventHandler};
use crate::event::domain::{
    DomainEvent, EventType, TaskCompletionDetail, TaskCreationDetail, UserRegistrationDetail,
};
use crate::notification::domain::EmailMessage;
use crate::notification::ports::{EmailSendError, EmailSender};
use crate::notification::render::{EmailRenderer, RenderError, RenderedEmail};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

/// Terminal state of a handled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// A message was rendered and handed to the email port.
    Sent,
    /// The payload carried no recipient address; nothing was sent.
    Skipped,
}

/// Errors raised while processing a dispatched event.
///
/// These propagate to the bus caller, which owns any retry policy.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// The event detail did not deserialize into the expected payload.
    #[error("malformed {event_type} payload: {message}")]
    Payload {
        /// Type of the offending event.
        event_type: EventType,
        /// Deserializer failure.
        message: String,
    },

    /// Rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Validation or delivery failed in the email port.
    #[error(transparent)]
    Email(#[from] EmailSendError),
}

/// Bus subscriber turning domain events into outbound email.
///
/// Single-shot: each event is processed once, with no internal retries.
pub struct NotificationHandler<S>
where
    S: EmailSender,
{
    sender: Arc<S>,
    renderer: EmailRenderer,
    sender_address: String,
}

impl<S> NotificationHandler<S>
where
    S: EmailSender,
{
    /// Creates a handler delivering through the given sender, with
    /// `sender_address` as the default `from` address.
    #[must_use]
    pub fn new(sender: Arc<S>, renderer: EmailRenderer, sender_address: impl Into<String>) -> Self {
        Self {
            sender,
            renderer,
            sender_address: sender_address.into(),
        }
    }

    /// Processes one event, branching on its type.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError`] when the payload is malformed or
    /// rendering/delivery fails. A missing recipient address is not an
    /// error; it yields [`NotificationOutcome::Skipped`].
    pub async fn handle_event(
        &self,
        event: &DomainEvent,
    ) -> Result<NotificationOutcome, NotificationError> {
        match event.event_type() {
            EventType::UserRegistration => self.process_user_registration(event).await,
            EventType::TaskCreation => self.process_task_creation(event).await,
            EventType::TaskCompletion => self.process_task_completion(event).await,
        }
    }

    async fn process_user_registration(
        &self,
        event: &DomainEvent,
    ) -> Result<NotificationOutcome, NotificationError> {
        let detail: UserRegistrationDetail = decode_detail(event)?;
        let Some(recipient) = detail.email.clone() else {
            return Ok(self.skip(event));
        };
        let rendered = self.renderer.render_user_registration(&detail)?;
        self.deliver(recipient, rendered).await
    }

    async fn process_task_creation(
        &self,
        event: &DomainEvent,
    ) -> Result<NotificationOutcome, NotificationError> {
        let detail: TaskCreationDetail = decode_detail(event)?;
        let Some(recipient) = detail.user_email.clone() else {
            return Ok(self.skip(event));
        };
        let rendered = self.renderer.render_task_creation(&detail)?;
        self.deliver(recipient, rendered).await
    }

    async fn process_task_completion(
        &self,
        event: &DomainEvent,
    ) -> Result<NotificationOutcome, NotificationError> {
        let detail: TaskCompletionDetail = decode_detail(event)?;
        let Some(recipient) = detail.user_email.clone() else {
            return Ok(self.skip(event));
        };
        let rendered = self.renderer.render_task_completion(&detail)?;
        self.deliver(recipient, rendered).await
    }

    fn skip(&self, event: &DomainEvent) -> NotificationOutcome {
        tracing::warn!(
            event_type = %event.event_type(),
            "event carries no recipient address, skipping notification"
        );
        NotificationOutcome::Skipped
    }

    async fn deliver(
        &self,
        recipient: String,
        rendered: RenderedEmail,
    ) -> Result<NotificationOutcome, NotificationError> {
        let message = EmailMessage::new(recipient, rendered.subject, rendered.html_body)
            .with_from(self.sender_address.clone())
            .as_html();
        self.sender.send(&message).await?;
        Ok(NotificationOutcome::Sent)
    }
}

fn decode_detail<T: DeserializeOwned>(event: &DomainEvent) -> Result<T, NotificationError> {
    serde_json::from_value(event.detail().clone()).map_err(|error| NotificationError::Payload {
        event_type: event.event_type(),
        message: error.to_string(),
    })
}

#[async_trait]
impl<S> EventHandler for NotificationHandler<S>
where
    S: EmailSender,
{
    async fn handle(&self, event: &DomainEvent) -> Result<(), DispatchError> {
        self.handle_event(event)
            .await
            .map(|_| ())
            .map_err(|error| DispatchError::handler(event.event_type(), error))
    }
}
