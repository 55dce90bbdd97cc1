//! Email message value and basic address validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for outbound email messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailValidationError {
    /// An address field does not look like an email address.
    #[error("invalid {field} address: {value}")]
    InvalidAddress {
        /// Which field carried the address.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// A required text field is empty.
    #[error("email {field} must not be empty")]
    EmptyField {
        /// The empty field.
        field: &'static str,
    },
}

/// Basic syntactic email address check.
///
/// Requires exactly one `@` separating a non-empty local part from a
/// domain containing a dot, with no whitespace anywhere. Deliverability is
/// the mail service's concern.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.') && !domain.contains('@')
}

/// Ephemeral outbound email message.
///
/// Exists only for the duration of a send call; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    cc: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<String>,
    subject: String,
    body: String,
    is_html: bool,
}

impl EmailMessage {
    /// Creates a plain-text message with the required fields.
    #[must_use]
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from: None,
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: subject.into(),
            body: body.into(),
            is_html: false,
        }
    }

    /// Sets the sender address, overriding the configured default.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Adds carbon-copy recipients.
    #[must_use]
    pub fn with_cc(mut self, cc: impl IntoIterator<Item = String>) -> Self {
        self.cc = cc.into_iter().collect();
        self
    }

    /// Adds blind-carbon-copy recipients.
    #[must_use]
    pub fn with_bcc(mut self, bcc: impl IntoIterator<Item = String>) -> Self {
        self.bcc = bcc.into_iter().collect();
        self
    }

    /// Marks the body as HTML.
    #[must_use]
    pub fn as_html(mut self) -> Self {
        self.is_html = true;
        self
    }

    /// Returns the recipient address.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Returns the sender address, when set.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Returns the carbon-copy recipients.
    #[must_use]
    pub fn cc(&self) -> &[String] {
        &self.cc
    }

    /// Returns the blind-carbon-copy recipients.
    #[must_use]
    pub fn bcc(&self) -> &[String] {
        &self.bcc
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the message body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns whether the body is HTML.
    #[must_use]
    pub const fn is_html(&self) -> bool {
        self.is_html
    }

    /// Validates addresses and required fields prior to any delivery
    /// attempt.
    ///
    /// # Errors
    ///
    /// Returns [`EmailValidationError`] for a malformed `to`, `from`, `cc`,
    /// or `bcc` address, or an empty subject or body.
    pub fn validate(&self) -> Result<(), EmailValidationError> {
        if !is_valid_email(&self.to) {
            return Err(EmailValidationError::InvalidAddress {
                field: "to",
                value: self.to.clone(),
            });
        }
        if let Some(from) = &self.from {
            if !is_valid_email(from) {
                return Err(EmailValidationError::InvalidAddress {
                    field: "from",
                    value: from.clone(),
                });
            }
        }
        for address in &self.cc {
            if !is_valid_email(address) {
                return Err(EmailValidationError::InvalidAddress {
                    field: "cc",
                    value: address.clone(),
                });
            }
        }
        for address in &self.bcc {
            if !is_valid_email(address) {
                return Err(EmailValidationError::InvalidAddress {
                    field: "bcc",
                    value: address.clone(),
                });
            }
        }
        if self.subject.is_empty() {
            return Err(EmailValidationError::EmptyField { field: "subject" });
        }
        if self.body.is_empty() {
            return Err(EmailValidationError::EmptyField { field: "body" });
        }
        Ok(())
    }
}
