//! Email rendering for the three notification types.
//!
//! Renderers are pure given their inputs and configuration: templates are
//! compiled once at construction with HTML autoescaping on, and completion
//! timestamps are formatted with an explicitly configured offset and format
//! string rather than ambient host locale.

use crate::event::domain::{TaskCompletionDetail, TaskCreationDetail, UserRegistrationDetail};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use minijinja::{context, Environment};
use std::fmt::Write as _;
use thiserror::Error;

const USER_REGISTRATION_TEMPLATE: &str = "user_registration.html";
const TASK_CREATION_TEMPLATE: &str = "task_creation.html";
const TASK_COMPLETION_TEMPLATE: &str = "task_completion.html";

const USER_REGISTRATION_SOURCE: &str = "\
<html>
  <body>
    <h1>Welcome, {{ username }}!</h1>
    <p>Your account is ready. Create your first task to get going.</p>
  </body>
</html>
";

const TASK_CREATION_SOURCE: &str = "\
<html>
  <body>
    <h1>New task created</h1>
    <h2>{{ title }}</h2>
    {% if description %}<p>{{ description }}</p>{% endif %}
    <p>Task ID: {{ task_id }}</p>
  </body>
</html>
";

const TASK_COMPLETION_SOURCE: &str = "\
<html>
  <body>
    <h1>Task completed</h1>
    <h2>{{ title }}</h2>
    <p>Completed at {{ completed_at }}.</p>
    <p>Task ID: {{ task_id }}</p>
  </body>
</html>
";

/// A rendered subject line and HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// Errors raised while rendering notification email.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// Template compilation or rendering failed.
    #[error("template error: {0}")]
    Template(String),
}

impl From<minijinja::Error> for RenderError {
    fn from(error: minijinja::Error) -> Self {
        Self::Template(error.to_string())
    }
}

/// Renderer holding the compiled notification templates.
#[derive(Debug, Clone)]
pub struct EmailRenderer {
    environment: Environment<'static>,
    offset: FixedOffset,
    timestamp_format: String,
}

impl EmailRenderer {
    /// Compiles the notification templates.
    ///
    /// `offset` and `timestamp_format` control how completion timestamps
    /// are rendered.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] when a template fails to compile.
    pub fn new(
        offset: FixedOffset,
        timestamp_format: impl Into<String>,
    ) -> Result<Self, RenderError> {
        let mut environment = Environment::new();
        environment.add_template(USER_REGISTRATION_TEMPLATE, USER_REGISTRATION_SOURCE)?;
        environment.add_template(TASK_CREATION_TEMPLATE, TASK_CREATION_SOURCE)?;
        environment.add_template(TASK_COMPLETION_TEMPLATE, TASK_COMPLETION_SOURCE)?;
        Ok(Self {
            environment,
            offset,
            timestamp_format: timestamp_format.into(),
        })
    }

    /// Renders the welcome message for a newly registered user.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] when rendering fails.
    pub fn render_user_registration(
        &self,
        detail: &UserRegistrationDetail,
    ) -> Result<RenderedEmail, RenderError> {
        let html_body = self
            .environment
            .get_template(USER_REGISTRATION_TEMPLATE)?
            .render(context! { username => &detail.username })?;
        Ok(RenderedEmail {
            subject: format!("Welcome to TaskApp, {}!", detail.username),
            html_body,
        })
    }

    /// Renders the notification for a created task.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] when rendering fails.
    pub fn render_task_creation(
        &self,
        detail: &TaskCreationDetail,
    ) -> Result<RenderedEmail, RenderError> {
        let html_body = self
            .environment
            .get_template(TASK_CREATION_TEMPLATE)?
            .render(context! {
                title => &detail.title,
                description => &detail.description,
                task_id => &detail.task_id,
            })?;
        Ok(RenderedEmail {
            subject: format!("New task: {}", detail.title),
            html_body,
        })
    }

    /// Renders the notification for a completed task.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] when rendering fails.
    pub fn render_task_completion(
        &self,
        detail: &TaskCompletionDetail,
    ) -> Result<RenderedEmail, RenderError> {
        let completed_at = self.format_timestamp(detail.completed_at);
        let html_body = self
            .environment
            .get_template(TASK_COMPLETION_TEMPLATE)?
            .render(context! {
                title => &detail.title,
                task_id => &detail.task_id,
                completed_at => &completed_at,
            })?;
        Ok(RenderedEmail {
            subject: format!("Task completed: {}", detail.title),
            html_body,
        })
    }

    /// Formats a timestamp in the configured offset and format, falling
    /// back to RFC 3339 when the configured format string is unusable.
    fn format_timestamp(&self, timestamp: DateTime<Utc>) -> String {
        let local = timestamp.with_timezone(&self.offset);
        let mut formatted = String::new();
        if write!(
            formatted,
            "{}",
            local.format(&self.timestamp_format)
        )
        .is_err()
        {
            return timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        }
        formatted
    }
}
