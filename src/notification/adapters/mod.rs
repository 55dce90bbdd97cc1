//! Adapter implementations of the email port.

mod logging;
mod memory;

pub use logging::LoggingEmailSender;
pub use memory::{FailingEmailSender, RecordingEmailSender};
