//! Log-only email sender for local wiring.

use crate::notification::domain::EmailMessage;
use crate::notification::ports::{EmailSendError, EmailSender};
use async_trait::async_trait;

/// Email sender that validates and logs instead of delivering.
///
/// Stands in for the managed transactional-email service when the process
/// runs without outbound mail access.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEmailSender;

impl LoggingEmailSender {
    /// Creates a logging sender.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailSendError> {
        message.validate()?;
        tracing::info!(
            to = message.to(),
            subject = message.subject(),
            is_html = message.is_html(),
            "email accepted for delivery"
        );
        Ok(())
    }
}
