//! Lumina - Photo library front end
//!
//! Main entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;

use std::sync::Arc;

use anyhow::Result;
use app_core::{
    AppConfig, AppError, HostClient, HostError, HostTransport, NotificationCenter,
    SocketTransport,
};
use async_trait::async_trait;
use host_proto::{HostCommand, HostResponse};

/// Stand-in transport when the host process is not reachable. Every call
/// fails, which the client boundary degrades to a notification, so the
/// window still opens instead of the app dying on startup.
struct DisconnectedTransport;

#[async_trait]
impl HostTransport for DisconnectedTransport {
    async fn call(&self, _command: HostCommand) -> Result<HostResponse, HostError> {
        Err(HostError::Io(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            "host process is not running",
        )))
    }
}

fn main() -> Result<()> {
    // Initialize logging and panic hook first
    let _log_guard = app_log::init()?;

    // Clean up old logs (7 days)
    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("Lumina starting...");

    let config = AppConfig::load().unwrap_or_default();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Init(format!("async runtime: {}", e)))?;

    let notifications = NotificationCenter::new(runtime.handle().clone());

    let transport: Arc<dyn HostTransport> = match runtime.block_on(SocketTransport::connect()) {
        Ok(transport) => Arc::new(transport),
        Err(e) => {
            tracing::error!("Could not reach the host process: {}", e);
            Arc::new(DisconnectedTransport)
        }
    };

    let host = HostClient::new(transport, notifications.clone());
    let state = app_core::AppState::new(config, notifications, host);

    app::run(state, runtime.handle().clone())
}
