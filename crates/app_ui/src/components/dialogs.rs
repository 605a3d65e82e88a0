//! Modal dialog primitives

use egui::{Align2, Context, Window};

/// Result of dialog interaction
pub enum DialogResult<T> {
    None,
    Ok(T),
    Cancel,
}

/// Common dialog trait
pub trait Dialog {
    type Output;
    fn ui(&mut self, ctx: &Context) -> DialogResult<Self::Output>;
    fn is_open(&self) -> bool;
    fn close(&mut self);
}

/// Confirmation dialog
pub struct ConfirmDialog {
    pub open: bool,
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub dangerous: bool,
}

impl ConfirmDialog {
    /// Confirm removing a library from the app. The files on disk stay.
    pub fn new_remove_library(library_name: &str) -> Self {
        Self {
            open: true,
            title: "Remove library".to_string(),
            message: format!(
                "Remove \"{}\" from Lumina? The folder and its files will not be deleted.",
                library_name
            ),
            confirm_text: "Remove".to_string(),
            cancel_text: "Cancel".to_string(),
            dangerous: true,
        }
    }

    pub fn new_import(file_count: usize, delete_source: bool) -> Self {
        let message = if delete_source {
            format!(
                "Import {} files and delete the originals afterwards?",
                file_count
            )
        } else {
            format!("Import {} files into this library?", file_count)
        };
        Self {
            open: true,
            title: "Import".to_string(),
            message,
            confirm_text: "Import".to_string(),
            cancel_text: "Cancel".to_string(),
            dangerous: delete_source,
        }
    }
}

impl Dialog for ConfirmDialog {
    type Output = bool;

    fn ui(&mut self, ctx: &Context) -> DialogResult<bool> {
        if !self.open {
            return DialogResult::None;
        }

        let mut result = DialogResult::None;

        Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&self.message);
                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    let confirm_btn = if self.dangerous {
                        ui.button(egui::RichText::new(&self.confirm_text).color(egui::Color32::RED))
                    } else {
                        ui.button(&self.confirm_text)
                    };

                    if confirm_btn.clicked() {
                        result = DialogResult::Ok(true);
                        self.open = false;
                    }

                    if ui.button(&self.cancel_text).clicked() {
                        result = DialogResult::Cancel;
                        self.open = false;
                    }
                });
            });

        result
    }

    fn is_open(&self) -> bool {
        self.open
    }
    fn close(&mut self) {
        self.open = false;
    }
}
