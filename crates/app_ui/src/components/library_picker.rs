//! Library picker dropdown

use egui::Ui;
use host_proto::Library;

use crate::theme::Theme;

/// Action emitted by the picker
#[derive(Debug, Clone)]
pub enum PickerAction {
    Select(String),
    CreateNew,
    Remove(String),
}

/// Dropdown listing the known libraries plus a create entry
pub struct LibraryPicker;

impl LibraryPicker {
    pub fn new() -> Self {
        Self
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        libraries: &[Library],
        selected_id: Option<&str>,
        theme: &Theme,
    ) -> Option<PickerAction> {
        let mut action = None;

        let current_name = selected_id
            .and_then(|id| libraries.iter().find(|l| l.id == id))
            .map(|l| format!("{} {}", l.icon, l.name))
            .unwrap_or_else(|| "Select a library".to_string());

        egui::ComboBox::from_id_salt("library_picker")
            .selected_text(current_name)
            .width(180.0)
            .show_ui(ui, |ui| {
                for lib in libraries {
                    let is_selected = selected_id == Some(lib.id.as_str());
                    let label = format!("{} {}", lib.icon, lib.name);
                    let response = ui.selectable_label(is_selected, label);
                    if response.clicked() && !is_selected {
                        action = Some(PickerAction::Select(lib.id.clone()));
                    }
                    response.context_menu(|ui| {
                        if ui
                            .button(egui::RichText::new("Remove library").color(theme.error))
                            .clicked()
                        {
                            action = Some(PickerAction::Remove(lib.id.clone()));
                            ui.close_menu();
                        }
                    });
                }
                ui.separator();
                if ui.button("➕ New library...").clicked() {
                    action = Some(PickerAction::CreateNew);
                }
            });

        action
    }
}

impl Default for LibraryPicker {
    fn default() -> Self {
        Self::new()
    }
}
