//! Adapter implementations of the event ports.

pub mod memory;
