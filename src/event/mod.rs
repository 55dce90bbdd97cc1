//! Domain events and their propagation.
//!
//! Events are produced by the task service after successful mutations,
//! handed to the [`ports::EventPublisher`] port, and routed by the
//! rule-matching [`bus::EventBus`] to subscribed handlers. Events are
//! ephemeral: not stored, not retried, not deduplicated.

pub mod adapters;
pub mod bus;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
