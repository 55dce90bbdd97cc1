//! Environment-driven configuration with hard-coded fallback defaults.
//!
//! Every setting tolerates an absent or malformed environment variable by
//! falling back to its default, so the service starts in a bare environment.

use chrono::{FixedOffset, Offset, Utc};
use std::env;

/// Environment variable naming the default sender address.
pub const SENDER_VAR: &str = "TASKAPP_SENDER";
/// Environment variable naming the event bus.
pub const EVENT_BUS_VAR: &str = "TASKAPP_EVENT_BUS";
/// Environment variable carrying the UTC offset, in minutes, used when
/// rendering completion timestamps.
pub const UTC_OFFSET_VAR: &str = "TASKAPP_UTC_OFFSET_MINUTES";
/// Environment variable carrying the `chrono` format string for rendered
/// timestamps.
pub const TIMESTAMP_FORMAT_VAR: &str = "TASKAPP_TIMESTAMP_FORMAT";
/// Environment variable carrying the HTTP bind address.
pub const BIND_ADDR_VAR: &str = "TASKAPP_BIND_ADDR";

const DEFAULT_SENDER: &str = "notifications@taskapp.example";
const DEFAULT_EVENT_BUS: &str = "taskapp-events";
const DEFAULT_TIMESTAMP_FORMAT: &str = "%d %b %Y, %H:%M";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

const MINUTES_PER_OFFSET_BOUND: i32 = 18 * 60;

/// Application configuration resolved once at process start and passed
/// explicitly into the components that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Default `from` address for outbound notification email.
    pub sender_address: String,
    /// Name of the event bus events are published to.
    pub event_bus_name: String,
    /// UTC offset, in minutes, applied when rendering timestamps.
    pub utc_offset_minutes: i32,
    /// `chrono` format string for rendered timestamps.
    pub timestamp_format: String,
    /// Address the HTTP adapter binds to.
    pub bind_addr: String,
}

impl AppConfig {
    /// Reads configuration from the environment, substituting defaults for
    /// absent or unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            sender_address: string_var(SENDER_VAR, DEFAULT_SENDER),
            event_bus_name: string_var(EVENT_BUS_VAR, DEFAULT_EVENT_BUS),
            utc_offset_minutes: offset_var(UTC_OFFSET_VAR),
            timestamp_format: string_var(TIMESTAMP_FORMAT_VAR, DEFAULT_TIMESTAMP_FORMAT),
            bind_addr: string_var(BIND_ADDR_VAR, DEFAULT_BIND_ADDR),
        }
    }

    /// Returns the rendering offset as a `chrono` fixed offset.
    ///
    /// Falls back to UTC if the configured minute count is out of range.
    #[must_use]
    pub fn render_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sender_address: DEFAULT_SENDER.to_owned(),
            event_bus_name: DEFAULT_EVENT_BUS.to_owned(),
            utc_offset_minutes: 0,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_owned(),
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
        }
    }
}

fn string_var(name: &str, fallback: &str) -> String {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}

fn offset_var(name: &str) -> i32 {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<i32>().ok())
        .filter(|minutes| minutes.abs() < MINUTES_PER_OFFSET_BOUND)
        .unwrap_or(0)
}
