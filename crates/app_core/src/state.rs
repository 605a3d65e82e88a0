//! Application state management

use crate::{AppConfig, HostClient, LibraryState, NotificationCenter, SelectionState};
use host_proto::Item;
use parking_lot::RwLock;
use std::sync::Arc;

/// Main application state. Constructed once at startup and shared via
/// `Arc`; stores are injected explicitly rather than living in globals.
pub struct AppState {
    /// Application configuration
    pub config: RwLock<AppConfig>,

    /// Libraries and picker state
    pub libraries: RwLock<LibraryState>,

    /// Items of the selected library, newest first
    pub items: RwLock<Vec<Item>>,

    /// Grid multi-select state
    pub selection: RwLock<SelectionState>,

    /// Notification store
    pub notifications: NotificationCenter,

    /// Host command client
    pub host: HostClient,
}

impl AppState {
    pub fn new(config: AppConfig, notifications: NotificationCenter, host: HostClient) -> Arc<Self> {
        Arc::new(Self {
            config: RwLock::new(config),
            libraries: RwLock::new(LibraryState::new()),
            items: RwLock::new(Vec::new()),
            selection: RwLock::new(SelectionState::new()),
            notifications,
            host,
        })
    }

    /// Save the current configuration
    pub fn save_config(&self) -> anyhow::Result<()> {
        self.config.read().save()
    }

    /// Replace the item list and reconcile the selection against it
    pub fn set_items(&self, items: Vec<Item>) {
        let mut current = self.items.write();
        let mut selection = self.selection.write();
        selection.reconcile(&items);
        *current = items;
    }

    /// Drop items and selection, e.g. when the selected library changes
    pub fn clear_items(&self) {
        self.items.write().clear();
        self.selection.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostError, HostTransport};
    use async_trait::async_trait;
    use host_proto::{HostCommand, HostResponse};

    struct NullTransport;

    #[async_trait]
    impl HostTransport for NullTransport {
        async fn call(&self, _command: HostCommand) -> Result<HostResponse, HostError> {
            Ok(HostResponse::Ack)
        }
    }

    fn test_item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            original_name: format!("{}.png", id),
            file_type: "image/png".to_string(),
            file_size: 1,
            width: None,
            height: None,
            checksum: String::new(),
            is_favorite: false,
            is_screenshot: false,
            is_screen_recording: false,
            live_video: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_set_items_reconciles_selection() {
        let notifications = NotificationCenter::new(tokio::runtime::Handle::current());
        let host = HostClient::new(Arc::new(NullTransport), notifications.clone());
        let state = AppState::new(AppConfig::default(), notifications, host);

        state.set_items(vec![test_item("a"), test_item("b")]);
        state.selection.write().select_single(0, "a");
        state.selection.write().toggle(1, "b");

        state.set_items(vec![test_item("b")]);

        let selection = state.selection.read();
        assert_eq!(selection.ids(), &["b".to_string()]);
    }
}
