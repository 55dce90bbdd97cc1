//! Unit tests for the event module.
