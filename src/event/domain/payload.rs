//! Typed detail payloads for the three event types.
//!
//! Field names are camelCased to match the published wire shapes. The
//! delivery address is optional everywhere; its absence means "skip the
//! notification" rather than an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Detail payload for `UserRegistration` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistrationDetail {
    /// Display name of the registered user.
    pub username: String,
    /// Delivery address for the welcome message, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Detail payload for `TaskCreation` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreationDetail {
    /// Identifier of the created task.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Task description, possibly empty.
    pub description: String,
    /// Identifier of the acting user, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Delivery address for the notification, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

/// Detail payload for `TaskCompletion` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletionDetail {
    /// Identifier of the completed task.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// When the task was completed.
    pub completed_at: DateTime<Utc>,
    /// Identifier of the acting user, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Delivery address for the notification, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}
