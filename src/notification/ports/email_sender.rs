//! Email sending port.

use crate::notification::domain::{EmailMessage, EmailValidationError};
use async_trait::async_trait;
use thiserror::Error;

/// Transactional email delivery contract.
///
/// Implementations must validate the message before attempting delivery:
/// a validation failure is raised synchronously and nothing is sent. On
/// valid input there is a single delivery attempt with no queuing or retry.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns [`EmailSendError::Invalid`] before any delivery attempt when
    /// the message fails validation, and [`EmailSendError::Delivery`] when
    /// the single send attempt fails.
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailSendError>;
}

/// Errors returned by email sender implementations.
#[derive(Debug, Clone, Error)]
pub enum EmailSendError {
    /// The message failed validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] EmailValidationError),

    /// The delivery attempt failed.
    #[error("email delivery failed: {message}")]
    Delivery {
        /// Underlying service failure.
        message: String,
    },
}
