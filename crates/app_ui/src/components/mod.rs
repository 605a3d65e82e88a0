//! UI Components

pub mod dialogs;
pub mod frame_bar;
pub mod import_dialog;
pub mod library_dialog;
pub mod library_picker;
pub mod notification_panel;
pub mod paged_dialog;
pub mod photo_grid;
pub mod toasts;

pub use dialogs::{ConfirmDialog, Dialog, DialogResult};
pub use frame_bar::{FrameBar, FrameBarAction};
pub use import_dialog::{ImportDialog, ImportRequest};
pub use library_dialog::{CreateLibraryDialog, CreateLibraryRequest, LibraryPage};
pub use library_picker::{LibraryPicker, PickerAction};
pub use notification_panel::{NotificationPanel, PanelAction};
pub use paged_dialog::{PageDirection, PagedDialog};
pub use photo_grid::{GridAction, PhotoGrid};
pub use toasts::ToastOverlay;
