//! Import dialog

use std::path::PathBuf;

use egui::{Align2, Context, Window};

use crate::components::dialogs::{Dialog, DialogResult};

/// Completed dialog output
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub source_paths: Vec<PathBuf>,
    pub delete_source: bool,
}

/// Confirms an import of already-picked files and whether the
/// originals should be deleted afterwards.
pub struct ImportDialog {
    pub open: bool,
    source_paths: Vec<PathBuf>,
    delete_source: bool,
}

impl ImportDialog {
    pub fn new(source_paths: Vec<PathBuf>, delete_source_default: bool) -> Self {
        Self {
            open: true,
            source_paths,
            delete_source: delete_source_default,
        }
    }
}

impl Dialog for ImportDialog {
    type Output = ImportRequest;

    fn ui(&mut self, ctx: &Context) -> DialogResult<ImportRequest> {
        if !self.open {
            return DialogResult::None;
        }

        let mut result = DialogResult::None;

        Window::new("Import")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.label(format!(
                    "{} files will be copied into the library.",
                    self.source_paths.len()
                ));

                egui::ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
                    for path in &self.source_paths {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.display().to_string());
                        ui.label(egui::RichText::new(name).weak());
                    }
                });

                ui.add_space(8.0);
                ui.checkbox(&mut self.delete_source, "Delete originals after import");
                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if ui.button("Import").clicked() {
                        result = DialogResult::Ok(ImportRequest {
                            source_paths: std::mem::take(&mut self.source_paths),
                            delete_source: self.delete_source,
                        });
                        self.open = false;
                    }
                    if ui.button("Cancel").clicked() {
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
