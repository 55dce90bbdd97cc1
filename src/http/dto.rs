//! Request and response bodies for the task API.

use crate::task::domain::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Task title; must not be empty.
    pub title: String,
    /// Task description; defaults to empty.
    #[serde(default)]
    pub description: String,
    /// Identifier of the acting user, when known.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Email address of the acting user, when known.
    #[serde(default)]
    pub user_email: Option<String>,
}

/// Body of `PUT /tasks/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description; an empty string clears the field.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PATCH /tasks/{id}/complete`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskBody {
    /// Identifier of the acting user, when known.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Email address of the acting user, when known.
    #[serde(default)]
    pub user_email: Option<String>,
}

/// A task as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Whether the task has been completed.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            completed: task.completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
