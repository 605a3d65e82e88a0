//! Application theming

use app_core::NotificationKind;
use egui::{Color32, Visuals};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub surface: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub accent: Color32,
    pub info: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(24, 24, 27),
            surface: Color32::from_rgb(39, 39, 42),
            text: Color32::from_rgb(244, 244, 245),
            text_secondary: Color32::from_rgb(161, 161, 170),
            accent: Color32::from_rgb(99, 102, 241),
            info: Color32::from_rgb(96, 165, 250),
            success: Color32::from_rgb(74, 222, 128),
            warning: Color32::from_rgb(250, 204, 21),
            error: Color32::from_rgb(248, 113, 113),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(250, 250, 250),
            surface: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(24, 24, 27),
            text_secondary: Color32::from_rgb(113, 113, 122),
            accent: Color32::from_rgb(79, 70, 229),
            info: Color32::from_rgb(59, 130, 246),
            success: Color32::from_rgb(34, 197, 94),
            warning: Color32::from_rgb(234, 179, 8),
            error: Color32::from_rgb(220, 38, 38),
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Accent color for a notification kind
    pub fn kind_color(&self, kind: NotificationKind) -> Color32 {
        match kind {
            NotificationKind::Info => self.info,
            NotificationKind::Success => self.success,
            NotificationKind::Warning => self.warning,
            NotificationKind::Error => self.error,
            NotificationKind::Task => self.accent,
        }
    }

    /// Icon glyph for a notification kind
    pub fn kind_icon(&self, kind: NotificationKind) -> &'static str {
        match kind {
            NotificationKind::Info => "ℹ",
            NotificationKind::Success => "✔",
            NotificationKind::Warning => "⚠",
            NotificationKind::Error => "✖",
            NotificationKind::Task => "⟳",
        }
    }

    /// Apply theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.name == "dark" {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.surface;
        visuals.selection.bg_fill = self.accent.linear_multiply(0.4);
        visuals.hyperlink_color = self.accent;

        ctx.set_visuals(visuals);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
