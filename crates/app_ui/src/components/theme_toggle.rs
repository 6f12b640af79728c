//! Footer theme switch

use crate::theme::Theme;
use egui::{Align2, FontId, Sense, Ui, Vec2};

/// Glyph showing the current mode: moon in dark mode, sun in light
pub fn mode_glyph(dark: bool) -> &'static str {
    if dark {
        "🌙"
    } else {
        "☀"
    }
}

/// Round button in the footer; true when clicked
pub struct ThemeSwitch;

impl ThemeSwitch {
    pub fn ui(ui: &mut Ui, theme: &Theme, pending: bool) -> bool {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(24.0), Sense::click());
        let response = response.on_hover_text(if theme.mode.is_dark() {
            "Switch to light mode (Ctrl+D)"
        } else {
            "Switch to dark mode (Ctrl+D)"
        });

        if response.hovered() {
            ui.painter().circle_filled(rect.center(), 12.0, egui::Color32::from_gray(128));
        }
        let color = if pending {
            theme.text.gamma_multiply(0.5)
        } else {
            theme.text
        };
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            mode_glyph(theme.mode.is_dark()),
            FontId::proportional(16.0),
            color,
        );

        response.clicked()
    }
}
