//! Async client for the native host process
//!
//! The host owns persistence and filesystem operations; the view layer
//! reaches it over a length-prefixed bincode channel on a local socket.
//! Every command invocation passes through a uniform error boundary: on
//! failure the caller receives a tagged [`CallOutcome`] and a generic
//! error notification is emitted, while the specific cause goes to the
//! log only.

use crate::notifications::{NotificationCenter, NotificationKind};
use async_trait::async_trait;
use host_proto::{
    decode_body, encode_frame, HostCommand, HostErrorCode, HostResponse, Item, Library,
    MAX_FRAME_LEN,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Failures crossing the host boundary
#[derive(Debug, Error)]
pub enum HostError {
    #[error("I/O error on host channel: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Frame(#[from] host_proto::FrameError),

    #[error("host reported {code:?}: {message}")]
    Host { code: HostErrorCode, message: String },

    #[error("unexpected response to {command}")]
    Protocol { command: &'static str },
}

/// Request/response channel to the host. Seam for tests; production use
/// goes through [`SocketTransport`].
#[async_trait]
pub trait HostTransport: Send + Sync {
    async fn call(&self, command: HostCommand) -> Result<HostResponse, HostError>;
}

/// Transport over an `interprocess` local socket
pub struct SocketTransport {
    stream: tokio::sync::Mutex<interprocess::local_socket::tokio::Stream>,
}

impl SocketTransport {
    /// Connect to the host's command socket
    pub async fn connect() -> Result<Self, HostError> {
        use interprocess::local_socket::tokio::prelude::*;
        use interprocess::local_socket::{GenericFilePath, GenericNamespaced, ToFsName, ToNsName};

        let raw = host_proto::socket_name();
        let name = if GenericNamespaced::is_supported() {
            raw.clone().to_ns_name::<GenericNamespaced>()?
        } else {
            raw.clone().to_fs_name::<GenericFilePath>()?
        };

        let stream = interprocess::local_socket::tokio::Stream::connect(name).await?;
        tracing::info!("Connected to host at {}", raw);

        Ok(Self {
            stream: tokio::sync::Mutex::new(stream),
        })
    }
}

#[async_trait]
impl HostTransport for SocketTransport {
    async fn call(&self, command: HostCommand) -> Result<HostResponse, HostError> {
        // One in-flight request at a time; the channel is strictly
        // request/response.
        let mut stream = self.stream.lock().await;

        let frame = encode_frame(&command)?;
        stream.write_all(&frame).await?;
        stream.flush().await?;

        let mut len_buf = [0u8; 4];
        stream.read_exact(&mut len_buf).await?;
        let len = u32::from_le_bytes(len_buf) as usize;
        if len > MAX_FRAME_LEN {
            return Err(host_proto::FrameError::Oversized(len).into());
        }

        let mut body = vec![0u8; len];
        stream.read_exact(&mut body).await?;
        Ok(decode_body(&body)?)
    }
}

/// Uniform `{data, error}` result of a guarded host call. Exactly one of
/// the two fields is populated.
#[derive(Debug)]
pub struct CallOutcome<T> {
    pub data: Option<T>,
    pub error: Option<HostError>,
}

impl<T> CallOutcome<T> {
    fn ok(data: T) -> Self {
        Self { data: Some(data), error: None }
    }

    fn err(error: HostError) -> Self {
        Self { data: None, error: Some(error) }
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    /// The payload, discarding the (already surfaced) error
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Client for the host command interface
#[derive(Clone)]
pub struct HostClient {
    transport: Arc<dyn HostTransport>,
    notifications: NotificationCenter,
}

impl HostClient {
    pub fn new(transport: Arc<dyn HostTransport>, notifications: NotificationCenter) -> Self {
        Self { transport, notifications }
    }

    pub async fn get_libraries(&self) -> CallOutcome<Vec<Library>> {
        self.guarded("get_libraries", HostCommand::GetLibraries, |resp| match resp {
            HostResponse::Libraries(libs) => Some(libs),
            _ => None,
        })
        .await
    }

    pub async fn create_library(
        &self,
        name: String,
        icon: String,
        color: String,
        path: String,
    ) -> CallOutcome<Library> {
        let cmd = HostCommand::CreateLibrary { name, icon, color, path };
        self.guarded("create_library", cmd, |resp| match resp {
            HostResponse::LibraryCreated(lib) => Some(lib),
            _ => None,
        })
        .await
    }

    pub async fn check_library_path(&self, library_id: String) -> CallOutcome<bool> {
        let cmd = HostCommand::CheckLibraryPath { library_id };
        self.guarded("check_library_path", cmd, |resp| match resp {
            HostResponse::PathChecked { exists } => Some(exists),
            _ => None,
        })
        .await
    }

    pub async fn update_library_path(&self, library_id: String, path: String) -> CallOutcome<()> {
        let cmd = HostCommand::UpdateLibraryPath { library_id, path };
        self.guarded("update_library_path", cmd, ack).await
    }

    pub async fn remove_library(&self, library_id: String) -> CallOutcome<()> {
        let cmd = HostCommand::RemoveLibrary { library_id };
        self.guarded("remove_library", cmd, ack).await
    }

    pub async fn get_selected_library(&self) -> CallOutcome<Option<String>> {
        self.guarded("get_selected_library", HostCommand::GetSelectedLibrary, |resp| match resp {
            HostResponse::SelectedLibrary(id) => Some(id),
            _ => None,
        })
        .await
    }

    pub async fn set_selected_library(&self, library_id: Option<String>) -> CallOutcome<()> {
        let cmd = HostCommand::SetSelectedLibrary { library_id };
        self.guarded("set_selected_library", cmd, ack).await
    }

    pub async fn get_items(&self, library_id: String) -> CallOutcome<Vec<Item>> {
        let cmd = HostCommand::GetItems { library_id };
        self.guarded("get_items", cmd, |resp| match resp {
            HostResponse::Items(items) => Some(items),
            _ => None,
        })
        .await
    }

    pub async fn add_items(
        &self,
        library_id: String,
        source_paths: Vec<String>,
        delete_source: bool,
    ) -> CallOutcome<Vec<Item>> {
        let cmd = HostCommand::AddItems { library_id, source_paths, delete_source };
        self.guarded("add_items", cmd, |resp| match resp {
            HostResponse::ItemsAdded(items) => Some(items),
            _ => None,
        })
        .await
    }

    /// Raw variant of `add_items` that skips the error boundary. Used by
    /// task-tracked imports, where the tracking notification itself
    /// reports the failure and a second generic one would be noise.
    pub async fn try_add_items(
        &self,
        library_id: String,
        source_paths: Vec<String>,
        delete_source: bool,
    ) -> Result<Vec<Item>, HostError> {
        let cmd = HostCommand::AddItems { library_id, source_paths, delete_source };
        match self.transport.call(cmd).await? {
            HostResponse::ItemsAdded(items) => Ok(items),
            HostResponse::Error { code, message } => Err(HostError::Host { code, message }),
            _ => Err(HostError::Protocol { command: "add_items" }),
        }
    }

    pub async fn set_items_favorite(
        &self,
        library_id: String,
        item_ids: Vec<String>,
        favorite: bool,
    ) -> CallOutcome<()> {
        let cmd = HostCommand::SetItemsFavorite { library_id, item_ids, favorite };
        self.guarded("set_items_favorite", cmd, ack).await
    }

    /// Error boundary shared by every command: host `Error` responses and
    /// transport failures degrade to a generic error notification plus a
    /// log line carrying the cause.
    async fn guarded<T>(
        &self,
        command: &'static str,
        cmd: HostCommand,
        extract: impl FnOnce(HostResponse) -> Option<T>,
    ) -> CallOutcome<T> {
        let result = match self.transport.call(cmd).await {
            Ok(HostResponse::Error { code, message }) => {
                Err(HostError::Host { code, message })
            }
            Ok(resp) => extract(resp).ok_or(HostError::Protocol { command }),
            Err(e) => Err(e),
        };

        match result {
            Ok(data) => CallOutcome::ok(data),
            Err(e) => {
                tracing::error!(command, error = %e, "Host command failed");
                self.notifications.push(
                    "Something went wrong",
                    None,
                    NotificationKind::Error,
                );
                CallOutcome::err(e)
            }
        }
    }
}

fn ack(resp: HostResponse) -> Option<()> {
    match resp {
        HostResponse::Ack => Some(()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct ScriptedTransport {
        responses: Mutex<Vec<Result<HostResponse, HostError>>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<HostResponse, HostError>>) -> Arc<Self> {
            Arc::new(Self { responses: Mutex::new(responses) })
        }
    }

    #[async_trait]
    impl HostTransport for ScriptedTransport {
        async fn call(&self, _command: HostCommand) -> Result<HostResponse, HostError> {
            self.responses.lock().remove(0)
        }
    }

    fn client_with(
        responses: Vec<Result<HostResponse, HostError>>,
    ) -> (HostClient, NotificationCenter) {
        let center = NotificationCenter::new(tokio::runtime::Handle::current());
        let client = HostClient::new(ScriptedTransport::new(responses), center.clone());
        (client, center)
    }

    #[tokio::test]
    async fn test_success_carries_data_only() {
        let (client, center) =
            client_with(vec![Ok(HostResponse::Libraries(vec![]))]);

        let outcome = client.get_libraries().await;

        assert!(outcome.is_ok());
        assert!(outcome.error.is_none());
        assert!(center.is_empty(), "no notification on success");
    }

    #[tokio::test]
    async fn test_host_error_surfaces_generic_notification() {
        let (client, center) = client_with(vec![Ok(HostResponse::Error {
            code: HostErrorCode::DatabaseFailure,
            message: "corrupt page".to_string(),
        })]);

        let outcome = client.get_items("lib-1".to_string()).await;

        assert!(outcome.data.is_none());
        assert!(matches!(
            outcome.error,
            Some(HostError::Host { code: HostErrorCode::DatabaseFailure, .. })
        ));

        let notis = center.notifications();
        assert_eq!(notis.len(), 1);
        assert_eq!(notis[0].title, "Something went wrong");
        assert_eq!(notis[0].kind, NotificationKind::Error);
        // The specific cause is logged, never shown verbatim
        assert!(notis[0].description.is_none());
    }

    #[tokio::test]
    async fn test_unexpected_variant_is_protocol_error() {
        let (client, center) = client_with(vec![Ok(HostResponse::Pong)]);

        let outcome = client.check_library_path("lib-1".to_string()).await;

        assert!(matches!(
            outcome.error,
            Some(HostError::Protocol { command: "check_library_path" })
        ));
        assert_eq!(center.len(), 1);
    }

    #[tokio::test]
    async fn test_try_add_items_never_notifies() {
        let (client, center) = client_with(vec![Ok(HostResponse::Error {
            code: HostErrorCode::ImportFailed,
            message: "disk full".to_string(),
        })]);

        let result = client
            .try_add_items("lib-1".to_string(), vec!["/tmp/a.jpg".to_string()], false)
            .await;

        assert!(matches!(result, Err(HostError::Host { .. })));
        assert!(center.is_empty(), "caller owns failure presentation");
    }

    #[tokio::test]
    async fn test_one_notification_per_failing_call() {
        let io_err = || {
            HostError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "gone",
            ))
        };
        let (client, center) = client_with(vec![Err(io_err()), Err(io_err())]);

        client.get_libraries().await;
        client.get_libraries().await;

        assert_eq!(center.len(), 2);
    }
}
