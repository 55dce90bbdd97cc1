//! Taskapp: event-driven task management backend.
//!
//! This crate implements a small task-management service together with the
//! notification pipeline triggered by task lifecycle changes. Domain events
//! (`TaskCreation`, `TaskCompletion`, `UserRegistration`) are published
//! through an abstract port, routed by a rule-matching event bus, and turned
//! into rendered email messages by a notification handler.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, logging)
//!
//! # Modules
//!
//! - [`task`]: Task entity, repository port, and the orchestrating service
//! - [`event`]: Domain events, publisher port, and rule-routed bus
//! - [`notification`]: Event-keyed email rendering and dispatch
//! - [`http`]: Inbound axum adapter exposing the task API
//! - [`config`]: Environment-driven configuration with fallback defaults

pub mod config;
pub mod event;
pub mod http;
pub mod notification;
pub mod task;
