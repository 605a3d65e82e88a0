//! Photo grid component with multi-select

use crate::theme::Theme;
use app_core::{ClickModifiers, SelectionState};
use egui::{Response, Sense, Ui, Vec2};
use host_proto::Item;

/// Photo grid component
pub struct PhotoGrid {
    /// Thumbnail edge length
    pub thumbnail_size: f32,

    /// Show file names under thumbnails
    pub show_filenames: bool,
}

/// Action emitted by the grid. Selection semantics are applied by the
/// caller; the grid only reports what was clicked and with which
/// modifiers.
#[derive(Debug, Clone)]
pub enum GridAction {
    /// Primary click on an item
    Clicked { index: usize, modifiers: ClickModifiers },

    /// Secondary click (context menu trigger)
    ContextClicked { index: usize },

    /// Context menu: set favorite flag on the whole selection
    SetFavorite { favorite: bool },

    /// Click on the empty background area outside any item
    BackgroundClicked,
}

impl PhotoGrid {
    pub fn new(thumbnail_size: u32, show_filenames: bool) -> Self {
        Self {
            thumbnail_size: thumbnail_size as f32,
            show_filenames,
        }
    }

    /// Render the grid
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        items: &[Item],
        selection: &SelectionState,
        theme: &Theme,
    ) -> Option<GridAction> {
        let mut action = None;

        if items.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("No photos yet. Import some to get started.")
                        .color(theme.text_secondary),
                );
            });
            return None;
        }

        let available_width = ui.available_width();
        let item_width = self.thumbnail_size + 16.0;
        let columns = (available_width / item_width).max(1.0) as usize;

        egui::Grid::new("photo_grid")
            .num_columns(columns)
            .spacing(Vec2::splat(8.0))
            .show(ui, |ui| {
                for (idx, item) in items.iter().enumerate() {
                    let is_selected = selection.contains(&item.id);
                    let response = self.grid_item(ui, item, is_selected, theme);

                    if response.clicked() {
                        let modifiers = ui.input(|i| ClickModifiers {
                            command: i.modifiers.command,
                            shift: i.modifiers.shift,
                        });
                        action = Some(GridAction::Clicked { index: idx, modifiers });
                    }

                    if response.secondary_clicked() {
                        action = Some(GridAction::ContextClicked { index: idx });
                    }

                    response.context_menu(|ui| {
                        if ui.button("Add to favorites").clicked() {
                            action = Some(GridAction::SetFavorite { favorite: true });
                            ui.close_menu();
                        }
                        if ui.button("Remove from favorites").clicked() {
                            action = Some(GridAction::SetFavorite { favorite: false });
                            ui.close_menu();
                        }
                    });

                    if (idx + 1) % columns == 0 {
                        ui.end_row();
                    }
                }
            });

        // Whatever is left below the grid counts as background
        let background = ui.allocate_response(ui.available_size_before_wrap(), Sense::click());
        if background.clicked() && action.is_none() {
            action = Some(GridAction::BackgroundClicked);
        }

        action
    }

    fn grid_item(&self, ui: &mut Ui, item: &Item, selected: bool, theme: &Theme) -> Response {
        let size = Vec2::splat(self.thumbnail_size);

        ui.vertical(|ui| {
            ui.set_width(size.x + 8.0);

            let (rect, response) = ui.allocate_exact_size(size, Sense::click());

            if selected {
                ui.painter()
                    .rect_filled(rect.expand(3.0), 6.0, theme.accent.linear_multiply(0.6));
            }

            // Thumbnail placeholder; the host owns thumbnail generation
            ui.painter().rect_filled(rect, 4.0, theme.surface);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                if item.file_type.starts_with("video") { "🎞" } else { "🖼" },
                egui::FontId::proportional(28.0),
                theme.text_secondary,
            );

            if item.is_favorite {
                ui.painter().text(
                    rect.right_top() + Vec2::new(-12.0, 12.0),
                    egui::Align2::CENTER_CENTER,
                    "★",
                    egui::FontId::proportional(16.0),
                    theme.warning,
                );
            }

            if self.show_filenames {
                let name = truncate_name(&item.original_name, 20);
                ui.add(egui::Label::new(name).truncate());
            }

            response
        })
        .inner
    }
}

fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let head: String = name.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short.jpg", 20), "short.jpg");
        assert_eq!(
            truncate_name("a_very_long_photo_file_name.jpg", 20),
            "a_very_long_photo...",
        );
    }
}
