//! Application theming

use app_core::ThemeMode;
use egui::{Color32, Visuals};

/// Corner radius of the window frame when it floats freely
pub const WINDOW_ROUNDING: f32 = 16.0;

/// Application theme
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Window frame, header and footer
    pub background: Color32,
    /// Browser pane
    pub content: Color32,
    pub text: Color32,
    /// Folder/file glyphs
    pub icon: Color32,
    /// Listing group borders
    pub border: Color32,
    pub hover: Color32,
    pub close_hover: Color32,
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            background: Color32::from_rgb(0x1f, 0x1f, 0x1f),
            content: Color32::from_rgb(0x29, 0x29, 0x29),
            text: Color32::from_rgb(0xf0, 0xf0, 0xf0),
            icon: Color32::from_white_alpha(191),
            border: Color32::from_gray(70),
            hover: Color32::from_rgba_unmultiplied(96, 165, 250, 51),
            close_hover: Color32::from_rgba_unmultiplied(248, 113, 113, 51),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            background: Color32::from_rgb(0xf0, 0xf0, 0xf0),
            content: Color32::from_rgb(0xfe, 0xfe, 0xfe),
            text: Color32::from_rgb(0x10, 0x10, 0x10),
            icon: Color32::from_black_alpha(191),
            border: Color32::from_gray(200),
            hover: Color32::from_rgba_unmultiplied(96, 165, 250, 51),
            close_hover: Color32::from_rgba_unmultiplied(248, 113, 113, 51),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Apply theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = if self.mode.is_dark() {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        // The window frame paints the background itself
        visuals.panel_fill = Color32::TRANSPARENT;
        visuals.window_fill = self.content;
        visuals.extreme_bg_color = self.content;
        visuals.override_text_color = Some(self.text);

        visuals.widgets.noninteractive.fg_stroke.color = self.text;
        visuals.widgets.inactive.fg_stroke.color = self.text;
        visuals.widgets.hovered.bg_fill = self.hover;
        visuals.widgets.hovered.weak_bg_fill = self.hover;
        visuals.widgets.hovered.fg_stroke.color = self.text;
        visuals.widgets.active.fg_stroke.color = self.text;

        style.visuals = visuals;
        ctx.set_style(style);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_by_mode() {
        let dark = Theme::for_mode(ThemeMode::Dark);
        assert_eq!(dark.background, Color32::from_rgb(31, 31, 31));
        assert_eq!(dark.content, Color32::from_rgb(41, 41, 41));
        assert_eq!(dark.text, Color32::from_rgb(240, 240, 240));

        let light = Theme::for_mode(ThemeMode::Light);
        assert_eq!(light.background, Color32::from_rgb(240, 240, 240));
        assert_eq!(light.content, Color32::from_rgb(254, 254, 254));
        assert_eq!(Theme::default(), dark);
    }
}
