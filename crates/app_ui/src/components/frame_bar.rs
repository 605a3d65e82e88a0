//! Top frame bar
//!
//! Hosts the library picker, import entry point, the compact task peek
//! indicator and the notification toggle.

use app_core::Notification;
use egui::Ui;
use host_proto::Library;

use crate::components::library_picker::{LibraryPicker, PickerAction};
use crate::theme::Theme;

/// Action emitted by the frame bar
#[derive(Debug, Clone)]
pub enum FrameBarAction {
    Picker(PickerAction),
    Import,
    ToggleNotifications,
}

/// Top bar spanning the window width
pub struct FrameBar {
    picker: LibraryPicker,
}

impl FrameBar {
    pub fn new() -> Self {
        Self {
            picker: LibraryPicker::new(),
        }
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        libraries: &[Library],
        selected_id: Option<&str>,
        peek: Option<&Notification>,
        notification_count: usize,
        theme: &Theme,
    ) -> Option<FrameBarAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if let Some(a) = self.picker.ui(ui, libraries, selected_id, theme) {
                action = Some(FrameBarAction::Picker(a));
            }

            if ui
                .add_enabled(selected_id.is_some(), egui::Button::new("⬆ Import"))
                .clicked()
            {
                action = Some(FrameBarAction::Import);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let bell = if notification_count > 0 {
                    format!("🔔 {}", notification_count)
                } else {
                    "🔔".to_string()
                };
                if ui.button(bell).clicked() {
                    action = Some(FrameBarAction::ToggleNotifications);
                }

                // Compact indicator for the newest in-flight task
                if let Some(task) = peek {
                    ui.add(egui::Spinner::new().size(14.0));
                    let text = task.peek.as_deref().unwrap_or(task.title.as_str());
                    ui.label(
                        egui::RichText::new(text)
                            .color(theme.text_secondary)
                            .small(),
                    );
                }
            });
        });

        action
    }
}

impl Default for FrameBar {
    fn default() -> Self {
        Self::new()
    }
}
