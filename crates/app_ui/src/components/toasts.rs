//! Toast overlay
//!
//! Implements [`ToastSink`] so the notification store can hand toasts to
//! the UI without knowing anything about egui. Expiry is owned here, not
//! by the store.

use std::time::{Duration, Instant};

use app_core::{Toast, ToastSink};
use egui::{Align2, Vec2};
use parking_lot::Mutex;

use crate::theme::Theme;

const TOAST_LIFETIME: Duration = Duration::from_secs(5);
const MAX_VISIBLE: usize = 4;

struct ActiveToast {
    toast: Toast,
    shown_at: Instant,
}

/// Stack of ephemeral toasts anchored to the bottom-right corner
pub struct ToastOverlay {
    ctx: egui::Context,
    active: Mutex<Vec<ActiveToast>>,
}

impl ToastOverlay {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            active: Mutex::new(Vec::new()),
        }
    }

    /// Draw all live toasts. Call once per frame after the main panels.
    pub fn ui(&self, ctx: &egui::Context, theme: &Theme) {
        let mut active = self.active.lock();
        active.retain(|t| t.shown_at.elapsed() < TOAST_LIFETIME);

        if active.is_empty() {
            return;
        }

        // Animation needs frames even when nothing else changes
        ctx.request_repaint_after(Duration::from_millis(250));

        let mut closed = None;
        for (idx, entry) in active.iter().take(MAX_VISIBLE).enumerate() {
            let offset = Vec2::new(-16.0, -16.0 - idx as f32 * 72.0);
            egui::Area::new(egui::Id::new(("toast", entry.toast.id)))
                .anchor(Align2::RIGHT_BOTTOM, offset)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style())
                        .fill(theme.surface)
                        .show(ui, |ui| {
                            ui.set_max_width(280.0);
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(theme.kind_icon(entry.toast.kind))
                                        .color(theme.kind_color(entry.toast.kind))
                                        .size(16.0),
                                );
                                ui.vertical(|ui| {
                                    ui.label(
                                        egui::RichText::new(&entry.toast.title)
                                            .color(theme.text)
                                            .strong(),
                                    );
                                    if let Some(desc) = &entry.toast.description {
                                        ui.label(
                                            egui::RichText::new(desc)
                                                .color(theme.text_secondary)
                                                .small(),
                                        );
                                    }
                                });
                                if ui.small_button("✖").clicked() {
                                    closed = Some(idx);
                                }
                            });
                        });
                });
        }

        if let Some(idx) = closed {
            active.remove(idx);
        }
    }

    #[cfg(test)]
    fn live_count(&self) -> usize {
        self.active.lock().len()
    }
}

impl ToastSink for ToastOverlay {
    fn show(&self, toast: Toast) {
        self.active.lock().push(ActiveToast {
            toast,
            shown_at: Instant::now(),
        });
        self.ctx.request_repaint();
    }

    fn dismiss_all(&self) {
        self.active.lock().clear();
        self.ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::NotificationKind;
    use uuid::Uuid;

    fn toast(kind: NotificationKind) -> Toast {
        Toast {
            id: Uuid::new_v4(),
            title: "Imported".to_string(),
            description: None,
            kind,
        }
    }

    #[test]
    fn test_show_and_dismiss_all() {
        let overlay = ToastOverlay::new(egui::Context::default());
        overlay.show(toast(NotificationKind::Success));
        overlay.show(toast(NotificationKind::Error));
        assert_eq!(overlay.live_count(), 2);

        overlay.dismiss_all();
        assert_eq!(overlay.live_count(), 0);
    }
}
