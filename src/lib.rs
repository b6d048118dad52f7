// MeetDesk Library
// Notification queue for the meetings client, exposed for testing and reuse

pub mod command_handlers;
pub mod config;
pub mod error;
pub mod messages;
pub mod models;
pub mod notifications;
pub mod ui;
pub mod ui_state;
pub mod utils;

// Re-export commonly used types
pub use config::NotificationConfig;
pub use error::{AppError, AppResult};
pub use models::*;
pub use notifications::{
    render_with, Notification, NotificationHandle, NotificationMessage, NotificationQueue,
    NotificationService, Renderer,
};

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Per-session state handed to whatever needs to raise notifications.
#[derive(Debug, Clone)]
pub struct AppState {
    pub notifications: NotificationHandle,
    pub config: Arc<NotificationConfig>,
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Starts a notification session on the current tokio runtime.
    pub fn start(
        config: NotificationConfig,
        renderer: impl Renderer + 'static,
    ) -> (Self, tokio::task::JoinHandle<()>) {
        let shutdown = CancellationToken::new();
        let (service, notifications) =
            NotificationService::new(&config, renderer, shutdown.clone());
        let task = service.spawn();
        let state = Self {
            notifications,
            config: Arc::new(config),
            shutdown,
        };
        (state, task)
    }

    /// Ends the session. Later notifications are dropped.
    pub fn end(&self) {
        self.shutdown.cancel();
    }
}
