//! Notification panel (history drawer)

use app_core::{Notification, NotificationKind};
use chrono::{DateTime, Utc};
use egui::Ui;
use uuid::Uuid;

use crate::theme::Theme;

/// Action emitted by the panel
#[derive(Debug, Clone)]
pub enum PanelAction {
    Dismiss(Uuid),
    ClearAll,
    Close,
}

/// Sliding panel listing all notifications, newest first
pub struct NotificationPanel;

impl NotificationPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        notifications: &[Notification],
        theme: &Theme,
    ) -> Option<PanelAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading("Notifications");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✖").clicked() {
                    action = Some(PanelAction::Close);
                }
                if !notifications.is_empty() && ui.small_button("Clear all").clicked() {
                    action = Some(PanelAction::ClearAll);
                }
            });
        });
        ui.separator();

        if notifications.is_empty() {
            ui.label(
                egui::RichText::new("Nothing here yet").color(theme.text_secondary),
            );
            return action;
        }

        let now = Utc::now();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for noti in notifications {
                if let Some(a) = self.entry(ui, noti, now, theme) {
                    action = Some(a);
                }
                ui.separator();
            }
        });

        action
    }

    fn entry(
        &self,
        ui: &mut Ui,
        noti: &Notification,
        now: DateTime<Utc>,
        theme: &Theme,
    ) -> Option<PanelAction> {
        let mut action = None;

        ui.horizontal_top(|ui| {
            ui.label(
                egui::RichText::new(theme.kind_icon(noti.kind))
                    .color(theme.kind_color(noti.kind)),
            );
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&noti.title).color(theme.text).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").clicked() {
                            action = Some(PanelAction::Dismiss(noti.id));
                        }
                        ui.label(
                            egui::RichText::new(relative_time(noti.timestamp, now))
                                .color(theme.text_secondary)
                                .small(),
                        );
                    });
                });
                if let Some(desc) = &noti.description {
                    ui.label(egui::RichText::new(desc).color(theme.text_secondary));
                }
                if noti.kind == NotificationKind::Task {
                    let progress = noti.progress.unwrap_or(0.0);
                    ui.add(
                        egui::ProgressBar::new(progress)
                            .desired_height(4.0)
                            .animate(noti.progress.is_none()),
                    );
                }
            });
        });

        action
    }
}

impl Default for NotificationPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-friendly age of a timestamp
fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let secs = elapsed.num_seconds().max(0);
    if secs < 60 {
        "Just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_relative_time() {
        let now = Utc::now();
        assert_eq!(relative_time(now, now), "Just now");
        assert_eq!(relative_time(now - Duration::seconds(59), now), "Just now");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative_time(now - Duration::hours(2), now), "2h ago");
        assert_eq!(relative_time(now - Duration::days(3), now), "3d ago");
    }

    #[test]
    fn test_relative_time_future_clamps_to_now() {
        let now = Utc::now();
        assert_eq!(relative_time(now + Duration::minutes(10), now), "Just now");
    }
}
