//! In-memory email senders for tests.

use crate::notification::domain::EmailMessage;
use crate::notification::ports::{EmailSendError, EmailSender};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Email sender that validates and records every message.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailSender {
    messages: Arc<RwLock<Vec<EmailMessage>>>,
}

impl RecordingEmailSender {
    /// Creates an empty recording sender.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the messages sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.messages
            .read()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailSendError> {
        message.validate()?;
        let mut messages = self
            .messages
            .write()
            .map_err(|error| EmailSendError::Delivery {
                message: error.to_string(),
            })?;
        messages.push(message.clone());
        Ok(())
    }
}

/// Email sender that validates, then fails every delivery.
#[derive(Debug, Clone)]
pub struct FailingEmailSender {
    message: String,
}

impl FailingEmailSender {
    /// Creates a sender failing with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingEmailSender {
    fn default() -> Self {
        Self::new("email service unavailable")
    }
}

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailSendError> {
        message.validate()?;
        Err(EmailSendError::Delivery {
            message: self.message.clone(),
        })
    }
}
