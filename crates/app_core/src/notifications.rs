//! Process-wide notification store
//!
//! Owns the ordered notification sequence (newest first) and the
//! panel-open flag. Producers push notifications and only ever hold ids
//! afterwards. A `Task`-kind notification tracks an in-flight
//! asynchronous operation and transitions to `Success` or `Error` when
//! the operation settles; exactly one outcome fires, exactly once.
//!
//! Toast presentation is delegated to a [`ToastSink`] collaborator; the
//! store never reads anything back from it.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

/// Notification kind, handled exhaustively wherever it matters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
    Warning,
    /// Tracks an in-flight asynchronous task
    Task,
}

impl NotificationKind {
    /// Tag used in structured log lines
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Task => "task",
        }
    }
}

/// A single user-facing notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub kind: NotificationKind,
    /// Short text for the compact task indicator
    pub peek: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Task progress in 0.0..=1.0
    pub progress: Option<f32>,
}

/// Partial update merged into an existing notification
#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<NotificationKind>,
    pub peek: Option<String>,
    pub progress: Option<f32>,
}

/// Ephemeral toast forwarded to the presentation surface
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub kind: NotificationKind,
}

/// Ephemeral toast presentation surface. Purely a rendering sink; the
/// store never reads state back from it.
pub trait ToastSink: Send + Sync {
    fn show(&self, toast: Toast);
    fn dismiss_all(&self);
}

/// Replacement title/description applied when a tracked task settles
#[derive(Debug, Clone, Default)]
pub struct OutcomeText {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Options for [`NotificationCenter::push_task`]
#[derive(Debug, Clone, Default)]
pub struct TaskOptions {
    pub peek: Option<String>,
    pub progress: Option<f32>,
    pub on_success: Option<OutcomeText>,
    pub on_error: Option<OutcomeText>,
}

struct StoreState {
    /// Newest first
    notifications: Vec<Notification>,
    panel_open: bool,
}

struct Inner {
    state: RwLock<StoreState>,
    sink: RwLock<Option<Arc<dyn ToastSink>>>,
    listeners: RwLock<Vec<Box<dyn Fn() + Send + Sync>>>,
    runtime: tokio::runtime::Handle,
}

/// Handle to the process-wide notification store. Cheap to clone; passed
/// explicitly to every producer instead of living in a global.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl NotificationCenter {
    /// `runtime` services tracked task futures
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(StoreState {
                    notifications: Vec::new(),
                    panel_open: false,
                }),
                sink: RwLock::new(None),
                listeners: RwLock::new(Vec::new()),
                runtime,
            }),
        }
    }

    /// Attach the toast presentation surface
    pub fn set_sink(&self, sink: Arc<dyn ToastSink>) {
        *self.inner.sink.write() = Some(sink);
    }

    /// Register a change listener, invoked after every mutation
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.inner.listeners.write().push(Box::new(listener));
    }

    /// Create a notification and prepend it to the sequence. Unless the
    /// panel is open, also presents an ephemeral toast.
    pub fn push(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        kind: NotificationKind,
    ) -> Uuid {
        self.insert(title.into(), description, kind, None, None)
    }

    /// Push a `Task` notification and register continuations on `task`.
    /// The caller is not blocked; when the future settles the
    /// notification transitions to `Success` or `Error` and the
    /// toast/log fire again as for a plain push, gated by the panel-open
    /// flag at settlement time.
    ///
    /// There is no cancellation: dismissing the notification does not
    /// stop the task, it only removes the visual representation. The
    /// settlement update on an absent id is then a no-op.
    pub fn push_task<F>(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        options: TaskOptions,
        task: F,
    ) -> Uuid
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let title = title.into();
        let id = self.insert(
            title.clone(),
            description.clone(),
            NotificationKind::Task,
            options.peek,
            options.progress,
        );

        let center = self.clone();
        let on_success = options.on_success.unwrap_or_default();
        let on_error = options.on_error.unwrap_or_default();

        self.inner.runtime.spawn(async move {
            match task.await {
                Ok(()) => {
                    center.settle(id, NotificationKind::Success, &title, &description, on_success);
                }
                Err(e) => {
                    tracing::error!(notification = %id, error = %e, "Tracked task failed");
                    center.settle(id, NotificationKind::Error, &title, &description, on_error);
                }
            }
        });

        id
    }

    /// Merge `patch` into the notification matching `id`; silently does
    /// nothing when the id is absent.
    pub fn update(&self, id: Uuid, patch: NotificationPatch) {
        {
            let mut state = self.inner.state.write();
            let Some(noti) = state.notifications.iter_mut().find(|n| n.id == id) else {
                return;
            };
            if let Some(title) = patch.title {
                noti.title = title;
            }
            if let Some(description) = patch.description {
                noti.description = Some(description);
            }
            if let Some(kind) = patch.kind {
                noti.kind = kind;
            }
            if let Some(peek) = patch.peek {
                noti.peek = Some(peek);
            }
            if let Some(progress) = patch.progress {
                noti.progress = Some(progress);
            }
        }
        self.changed();
    }

    /// Remove a single notification
    pub fn dismiss(&self, id: Uuid) {
        self.inner.state.write().notifications.retain(|n| n.id != id);
        self.changed();
    }

    /// Empty the sequence
    pub fn clear_all(&self) {
        self.inner.state.write().notifications.clear();
        self.changed();
    }

    /// Set the panel-open flag. Opening the panel dismisses any live
    /// toasts so the panel is the single visibility surface.
    pub fn set_panel_open(&self, open: bool) {
        let was_open = {
            let mut state = self.inner.state.write();
            std::mem::replace(&mut state.panel_open, open)
        };
        if open && !was_open {
            if let Some(sink) = self.inner.sink.read().clone() {
                sink.dismiss_all();
            }
        }
        self.changed();
    }

    pub fn is_panel_open(&self) -> bool {
        self.inner.state.read().panel_open
    }

    /// The task notification shown by the compact "in progress"
    /// indicator. With several task notifications present this returns
    /// the first match in newest-first order; the data model does not
    /// forbid multiples.
    pub fn peek(&self) -> Option<Notification> {
        self.inner
            .state
            .read()
            .notifications
            .iter()
            .find(|n| n.kind == NotificationKind::Task)
            .cloned()
    }

    /// Snapshot of the sequence, newest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.state.read().notifications.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.state.read().notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.read().notifications.is_empty()
    }

    fn insert(
        &self,
        title: String,
        description: Option<String>,
        kind: NotificationKind,
        peek: Option<String>,
        progress: Option<f32>,
    ) -> Uuid {
        let noti = Notification {
            id: Uuid::new_v4(),
            title,
            description,
            kind,
            peek,
            timestamp: Utc::now(),
            progress,
        };
        let id = noti.id;

        let panel_open = {
            let mut state = self.inner.state.write();
            state.notifications.insert(0, noti.clone());
            state.panel_open
        };

        self.log(kind, &noti.title, noti.description.as_deref());

        // Task notifications only toast once they settle
        if !panel_open && kind != NotificationKind::Task {
            self.toast(id, &noti.title, noti.description.as_deref(), kind);
        }

        self.changed();
        id
    }

    /// Apply a tracked task's outcome: update the notification (a no-op
    /// if it was dismissed meanwhile) and re-trigger toast/log exactly
    /// as for a plain push of the outcome kind.
    fn settle(
        &self,
        id: Uuid,
        kind: NotificationKind,
        base_title: &str,
        base_description: &Option<String>,
        text: OutcomeText,
    ) {
        let title = text.title.unwrap_or_else(|| base_title.to_string());
        let description = text.description.or_else(|| base_description.clone());

        self.update(
            id,
            NotificationPatch {
                title: Some(title.clone()),
                description: description.clone(),
                kind: Some(kind),
                ..Default::default()
            },
        );

        self.log(kind, &title, description.as_deref());
        if !self.is_panel_open() {
            self.toast(id, &title, description.as_deref(), kind);
        }
        self.changed();
    }

    fn toast(&self, id: Uuid, title: &str, description: Option<&str>, kind: NotificationKind) {
        if let Some(sink) = self.inner.sink.read().clone() {
            sink.show(Toast {
                id,
                title: title.to_string(),
                description: description.map(str::to_string),
                kind,
            });
        }
    }

    fn log(&self, kind: NotificationKind, title: &str, description: Option<&str>) {
        let text = match description {
            Some(d) => format!("{} - {}", title, d),
            None => title.to_string(),
        };
        match kind {
            NotificationKind::Error => tracing::error!(kind = kind.label(), "{}", text),
            NotificationKind::Warning => tracing::warn!(kind = kind.label(), "{}", text),
            _ => tracing::info!(kind = kind.label(), "{}", text),
        }
    }

    fn changed(&self) {
        for listener in self.inner.listeners.read().iter() {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingSink {
        shown: Mutex<Vec<Toast>>,
        dismissed: Mutex<u32>,
    }

    impl ToastSink for RecordingSink {
        fn show(&self, toast: Toast) {
            self.shown.lock().push(toast);
        }
        fn dismiss_all(&self) {
            *self.dismissed.lock() += 1;
        }
    }

    fn center_with_sink() -> (NotificationCenter, Arc<RecordingSink>) {
        let center = NotificationCenter::new(tokio::runtime::Handle::current());
        let sink = Arc::new(RecordingSink::default());
        center.set_sink(sink.clone());
        (center, sink)
    }

    async fn wait_for_kind(center: &NotificationCenter, id: Uuid, kind: NotificationKind) {
        for _ in 0..200 {
            let matched = center
                .notifications()
                .iter()
                .any(|n| n.id == id && n.kind == kind);
            if matched {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("notification {} never reached kind {:?}", id, kind);
    }

    #[tokio::test]
    async fn test_push_is_newest_first() {
        let (center, _) = center_with_sink();

        center.push("first", None, NotificationKind::Info);
        center.push("second", None, NotificationKind::Warning);

        let all = center.notifications();
        assert_eq!(all[0].title, "second");
        assert_eq!(all[1].title, "first");
    }

    #[tokio::test]
    async fn test_toast_gated_by_panel() {
        let (center, sink) = center_with_sink();

        center.push("visible", None, NotificationKind::Info);
        assert_eq!(sink.shown.lock().len(), 1);

        center.set_panel_open(true);
        assert_eq!(*sink.dismissed.lock(), 1, "opening the panel drops live toasts");

        center.push("silent", None, NotificationKind::Error);
        assert_eq!(sink.shown.lock().len(), 1, "no toast while panel is open");
    }

    #[tokio::test]
    async fn test_task_success_transition() {
        let (center, sink) = center_with_sink();
        let (tx, rx) = futures::channel::oneshot::channel::<()>();

        let id = center.push_task(
            "Importing",
            Some("5 items".to_string()),
            TaskOptions {
                on_success: Some(OutcomeText {
                    title: Some("Done".to_string()),
                    description: None,
                }),
                ..Default::default()
            },
            async move {
                rx.await.ok();
                Ok(())
            },
        );

        assert_eq!(center.peek().map(|n| n.id), Some(id));
        assert!(sink.shown.lock().is_empty(), "task kind does not toast on push");

        tx.send(()).ok();
        wait_for_kind(&center, id, NotificationKind::Success).await;

        let noti = center
            .notifications()
            .into_iter()
            .find(|n| n.id == id)
            .unwrap();
        assert_eq!(noti.title, "Done");
        assert_eq!(noti.description.as_deref(), Some("5 items"));
        assert_eq!(sink.shown.lock().len(), 1, "exactly one settlement toast");
        assert!(center.peek().is_none());
    }

    #[tokio::test]
    async fn test_task_error_transition() {
        let (center, sink) = center_with_sink();

        let id = center.push_task(
            "Importing",
            None,
            TaskOptions {
                on_error: Some(OutcomeText {
                    title: Some("Import failed".to_string()),
                    description: Some("disk full".to_string()),
                }),
                ..Default::default()
            },
            async { Err(anyhow::anyhow!("boom")) },
        );

        wait_for_kind(&center, id, NotificationKind::Error).await;

        let noti = center
            .notifications()
            .into_iter()
            .find(|n| n.id == id)
            .unwrap();
        assert_eq!(noti.title, "Import failed");
        assert_eq!(noti.description.as_deref(), Some("disk full"));

        let shown = sink.shown.lock();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_settlement_after_dismiss_is_silent_update() {
        let (center, sink) = center_with_sink();
        let (tx, rx) = futures::channel::oneshot::channel::<()>();

        let id = center.push_task("Working", None, TaskOptions::default(), async move {
            rx.await.ok();
            Ok(())
        });

        center.dismiss(id);
        assert!(center.is_empty());

        tx.send(()).ok();
        // The continuation still fires: toast appears, store stays empty
        for _ in 0..200 {
            if !sink.shown.lock().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(sink.shown.lock().len(), 1);
        assert!(center.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_id_is_noop() {
        let (center, _) = center_with_sink();
        center.push("only", None, NotificationKind::Info);

        center.update(
            Uuid::new_v4(),
            NotificationPatch {
                title: Some("ghost".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(center.notifications()[0].title, "only");
    }

    #[tokio::test]
    async fn test_clear_all() {
        let (center, _) = center_with_sink();
        for i in 0..5 {
            center.push(format!("n{}", i), None, NotificationKind::Info);
        }

        center.clear_all();

        assert!(center.is_empty());
    }

    #[tokio::test]
    async fn test_peek_prefers_newest_task() {
        let (center, _) = center_with_sink();
        let (_tx1, rx1) = futures::channel::oneshot::channel::<()>();
        let (_tx2, rx2) = futures::channel::oneshot::channel::<()>();

        center.push_task("older", None, TaskOptions::default(), async move {
            rx1.await.ok();
            Ok(())
        });
        let newer = center.push_task("newer", None, TaskOptions::default(), async move {
            rx2.await.ok();
            Ok(())
        });

        assert_eq!(center.peek().map(|n| n.id), Some(newer));
    }

    #[tokio::test]
    async fn test_subscribers_fire_on_mutation() {
        let (center, _) = center_with_sink();
        let hits = Arc::new(Mutex::new(0u32));
        let hits2 = hits.clone();
        center.subscribe(move || *hits2.lock() += 1);

        center.push("a", None, NotificationKind::Info);
        center.clear_all();

        assert!(*hits.lock() >= 2);
    }
}
