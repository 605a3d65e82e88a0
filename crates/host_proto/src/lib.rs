//! Protocol definitions for UI <-> host process communication
//!
//! This crate defines the shared data structures and framing for the
//! command channel between the view layer and the native host process
//! that owns persistence and filesystem operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A registered photo library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub id: String,
    pub name: String,
    /// Emoji shown in the picker chip
    pub icon: String,
    /// Chip background color, e.g. "#4f6df5"
    pub color: String,
    /// Library root directory on disk
    pub path: String,
}

/// A single library item (photo or video), read-only to the view layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub original_name: String,
    /// MIME type, e.g. "image/jpeg"
    pub file_type: String,
    pub file_size: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub checksum: String,
    pub is_favorite: bool,
    pub is_screenshot: bool,
    pub is_screen_recording: bool,
    /// Companion video file for live photos
    pub live_video: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Commands sent from the view layer to the host process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HostCommand {
    /// List all registered libraries
    GetLibraries,

    /// Register a new library rooted at `path`
    CreateLibrary {
        name: String,
        icon: String,
        color: String,
        path: String,
    },

    /// Check that a library's root directory still exists
    CheckLibraryPath { library_id: String },

    /// Repoint a library's root directory
    UpdateLibraryPath { library_id: String, path: String },

    /// Delete a library registration (files are left in place)
    RemoveLibrary { library_id: String },

    /// Get the persisted "last selected" library id
    GetSelectedLibrary,

    /// Persist the "last selected" library id
    SetSelectedLibrary { library_id: Option<String> },

    /// List items in a library
    GetItems { library_id: String },

    /// Import files into a library
    AddItems {
        library_id: String,
        source_paths: Vec<String>,
        delete_source: bool,
    },

    /// Bulk favorite toggle
    SetItemsFavorite {
        library_id: String,
        item_ids: Vec<String>,
        favorite: bool,
    },

    /// Health check
    Ping,
}

/// Responses from the host process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HostResponse {
    Libraries(Vec<Library>),
    LibraryCreated(Library),
    PathChecked { exists: bool },
    SelectedLibrary(Option<String>),
    Items(Vec<Item>),
    ItemsAdded(Vec<Item>),

    /// Generic success for commands without a payload
    Ack,

    /// Pong response to Ping
    Pong,

    /// Host-side failure
    Error { code: HostErrorCode, message: String },
}

/// Error codes reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostErrorCode {
    LibraryNotFound,
    LibraryUnreachable,
    DatabaseFailure,
    ImportFailed,
    InvalidRequest,
    Io,
    Unknown,
}

/// Framing failures on the command channel
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame exceeds maximum size: {0} bytes")]
    Oversized(usize),

    #[error("frame truncated")]
    Truncated,

    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Upper bound on a single frame; an import response listing thousands
/// of items stays well below this.
pub const MAX_FRAME_LEN: usize = 32 * 1024 * 1024;

/// Local socket name for the host command channel, unique per user
pub fn socket_name() -> String {
    #[cfg(windows)]
    {
        "\\\\.\\pipe\\Lumina_host".to_string()
    }
    #[cfg(not(windows))]
    {
        let user = std::env::var("USER").unwrap_or_else(|_| "default".to_string());
        format!("/tmp/lumina_host_{}.sock", user)
    }
}

/// Encode a message as a length-prefixed frame (u32 LE prefix)
pub fn encode_frame<T: Serialize>(msg: &T) -> Result<Vec<u8>, FrameError> {
    let body = bincode::serialize(msg)?;
    if body.len() > MAX_FRAME_LEN {
        return Err(FrameError::Oversized(body.len()));
    }
    let mut frame = Vec::with_capacity(4 + body.len());
    frame.extend_from_slice(&(body.len() as u32).to_le_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Decode a frame body (without the length prefix)
pub fn decode_body<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<T, FrameError> {
    Ok(bincode::deserialize(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_frame_roundtrip() {
        let cmd = HostCommand::AddItems {
            library_id: "lib-1".to_string(),
            source_paths: vec!["/tmp/a.jpg".to_string(), "/tmp/b.png".to_string()],
            delete_source: false,
        };

        let frame = encode_frame(&cmd).unwrap();
        let len = u32::from_le_bytes(frame[..4].try_into().unwrap()) as usize;
        assert_eq!(len, frame.len() - 4);

        let decoded: HostCommand = decode_body(&frame[4..]).unwrap();
        match decoded {
            HostCommand::AddItems { source_paths, delete_source, .. } => {
                assert_eq!(source_paths.len(), 2);
                assert!(!delete_source);
            }
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_error_response() {
        let resp = HostResponse::Error {
            code: HostErrorCode::LibraryUnreachable,
            message: "library root missing".to_string(),
        };

        let frame = encode_frame(&resp).unwrap();
        let decoded: HostResponse = decode_body(&frame[4..]).unwrap();
        match decoded {
            HostResponse::Error { code, .. } => {
                assert_eq!(code, HostErrorCode::LibraryUnreachable);
            }
            _ => panic!("Wrong variant"),
        }
    }
}
