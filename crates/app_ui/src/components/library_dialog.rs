//! Create-library dialog
//!
//! Two pages: identity (name, icon, color) then storage location.

use std::path::PathBuf;

use egui::{Align2, Color32, Context, Window};

use crate::components::dialogs::{Dialog, DialogResult};
use crate::components::paged_dialog::PagedDialog;
use crate::pickers;

const ICON_CHOICES: &[&str] = &["📷", "🏞", "🌅", "🎞", "👪", "✈", "🎨", "⭐"];

const COLOR_CHOICES: &[(&str, Color32)] = &[
    ("indigo", Color32::from_rgb(99, 102, 241)),
    ("blue", Color32::from_rgb(59, 130, 246)),
    ("green", Color32::from_rgb(34, 197, 94)),
    ("yellow", Color32::from_rgb(234, 179, 8)),
    ("orange", Color32::from_rgb(249, 115, 22)),
    ("red", Color32::from_rgb(239, 68, 68)),
    ("pink", Color32::from_rgb(236, 72, 153)),
];

/// Pages of the create-library flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryPage {
    Identity,
    Location,
}

/// Completed dialog output
#[derive(Debug, Clone)]
pub struct CreateLibraryRequest {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub path: PathBuf,
}

/// Paged dialog collecting everything needed to create a library
pub struct CreateLibraryDialog {
    pub open: bool,
    pages: PagedDialog,
    name: String,
    icon: String,
    color: String,
    path: Option<PathBuf>,
}

impl CreateLibraryDialog {
    pub fn new() -> Self {
        Self {
            open: true,
            pages: PagedDialog::new(2),
            name: String::new(),
            icon: ICON_CHOICES[0].to_string(),
            color: COLOR_CHOICES[0].0.to_string(),
            path: None,
        }
    }

    pub fn page(&self) -> LibraryPage {
        if self.pages.is_first() {
            LibraryPage::Identity
        } else {
            LibraryPage::Location
        }
    }

    fn identity_page(&mut self, ui: &mut egui::Ui) {
        ui.label("Name");
        ui.text_edit_singleline(&mut self.name);
        ui.add_space(8.0);

        ui.label("Icon");
        ui.horizontal_wrapped(|ui| {
            for icon in ICON_CHOICES {
                if ui
                    .selectable_label(self.icon == *icon, *icon)
                    .clicked()
                {
                    self.icon = icon.to_string();
                }
            }
        });
        ui.add_space(8.0);

        ui.label("Color");
        ui.horizontal(|ui| {
            for (name, color) in COLOR_CHOICES {
                let selected = self.color == *name;
                let (rect, response) =
                    ui.allocate_exact_size(egui::Vec2::splat(20.0), egui::Sense::click());
                ui.painter().circle_filled(rect.center(), 9.0, *color);
                if selected {
                    ui.painter()
                        .circle_stroke(rect.center(), 11.0, (2.0, ui.visuals().text_color()));
                }
                if response.clicked() {
                    self.color = name.to_string();
                }
            }
        });
    }

    fn location_page(&mut self, ui: &mut egui::Ui) {
        ui.label("Where should this library live?");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("Choose folder...").clicked() {
                if let Some(path) = pickers::pick_library_folder("Choose library folder") {
                    self.path = Some(path);
                }
            }
            match &self.path {
                Some(path) => {
                    ui.label(path.display().to_string());
                }
                None => {
                    ui.label(
                        egui::RichText::new("No folder selected").weak(),
                    );
                }
            }
        });
    }
}

impl Default for CreateLibraryDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialog for CreateLibraryDialog {
    type Output = CreateLibraryRequest;

    fn ui(&mut self, ctx: &Context) -> DialogResult<CreateLibraryRequest> {
        if !self.open {
            return DialogResult::None;
        }

        let mut result = DialogResult::None;

        Window::new("New library")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(320.0);

                match self.page() {
                    LibraryPage::Identity => self.identity_page(ui),
                    LibraryPage::Location => self.location_page(ui),
                }

                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    match self.page() {
                        LibraryPage::Identity => {
                            let can_continue = !self.name.trim().is_empty();
                            if ui
                                .add_enabled(can_continue, egui::Button::new("Continue"))
                                .clicked()
                            {
                                self.pages.next();
                            }
                        }
                        LibraryPage::Location => {
                            if ui.button("Back").clicked() {
                                self.pages.back();
                            }
                            let can_create = self.path.is_some();
                            if ui
                                .add_enabled(can_create, egui::Button::new("Create"))
                                .clicked()
                            {
                                if let Some(path) = self.path.clone() {
                                    result = DialogResult::Ok(CreateLibraryRequest {
                                        name: self.name.trim().to_string(),
                                        icon: self.icon.clone(),
                                        color: self.color.clone(),
                                        path,
                                    });
                                    self.open = false;
                                }
                            }
                        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_identity_page() {
        let dialog = CreateLibraryDialog::new();
        assert_eq!(dialog.page(), LibraryPage::Identity);
        assert!(dialog.is_open());
    }
}
