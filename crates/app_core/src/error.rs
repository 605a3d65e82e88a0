//! Application error types

use crate::host::HostError;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Recoverable Errors (notify user, continue) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("File dialog failed: {0}")]
    Dialog(String),

    // ===== Fatal Errors (application termination) =====
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl AppError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Io(_) | AppError::Host(_) | AppError::Dialog(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Host(_) => "Something went wrong".to_string(),
            AppError::Dialog(_) => "Could not open the file dialog".to_string(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let host = AppError::Host(crate::host::HostError::Protocol {
            command: "get_items",
        });
        assert!(host.is_recoverable());
        assert_eq!(host.user_message(), "Something went wrong");

        let init = AppError::Init("no GPU adapter".to_string());
        assert!(init.is_fatal());
    }
}
