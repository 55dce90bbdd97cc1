//! Taskapp HTTP server.
//!
//! Wires configuration, the in-memory repository, the rule-routed event
//! bus, and the notification handler into the axum router, then serves
//! until shutdown. All wiring happens here, once, at process start.

use mockable::DefaultClock;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use taskapp::config::AppConfig;
use taskapp::event::bus::{BusPublisher, EventBus};
use taskapp::http::{router, AppState};
use taskapp::notification::adapters::LoggingEmailSender;
use taskapp::notification::handler::NotificationHandler;
use taskapp::notification::render::EmailRenderer;
use taskapp::task::adapters::memory::InMemoryTaskRepository;
use taskapp::task::services::TaskService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    let renderer = EmailRenderer::new(config.render_offset(), config.timestamp_format.clone())?;
    let handler = Arc::new(NotificationHandler::new(
        Arc::new(LoggingEmailSender::new()),
        renderer,
        config.sender_address.clone(),
    ));
    let bus = Arc::new(EventBus::with_notification_rules(
        config.event_bus_name.clone(),
        handler,
    ));

    let service = Arc::new(
        TaskService::new(Arc::new(InMemoryTaskRepository::new()), Arc::new(DefaultClock))
            .with_publisher(Arc::new(BusPublisher::new(bus))),
    );

    let app = router(AppState::new(service));
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, bus = %config.event_bus_name, "taskapp listening");
    axum::serve(listener, app).await?;
    Ok(())
}
