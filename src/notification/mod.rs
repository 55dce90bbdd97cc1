//! Event-keyed notification dispatch and email rendering.
//!
//! The [`handler::NotificationHandler`] subscribes to the event bus,
//! branches on event type, renders a subject and HTML body through
//! [`render::EmailRenderer`], and delivers through the
//! [`ports::EmailSender`] port. A payload without a recipient address is
//! skipped, not failed.

pub mod adapters;
pub mod domain;
pub mod handler;
pub mod ports;
pub mod render;

#[cfg(test)]
mod tests;
