//! Lumina Core Domain Logic
//!
//! This crate contains:
//! - Application state management
//! - Grid selection model
//! - Notification store
//! - Host process client
//! - Configuration
//! - Error types

pub mod config;
pub mod error;
pub mod host;
pub mod library;
pub mod notifications;
pub mod selection;
pub mod state;

pub use config::{AppConfig, GeneralConfig, GridConfig, ImportConfig, SortOrder};
pub use error::AppError;
pub use host::{CallOutcome, HostClient, HostError, HostTransport, SocketTransport};
pub use library::LibraryState;
pub use notifications::{
    Notification, NotificationCenter, NotificationKind, NotificationPatch, OutcomeText,
    TaskOptions, Toast, ToastSink,
};
pub use selection::{ClickModifiers, SelectionState};
pub use state::AppState;
