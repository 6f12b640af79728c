//! Custom title bar: icon, title, drag region and window buttons

use crate::theme::Theme;
use app_core::WindowMode;
use egui::{Align, Align2, Color32, FontId, Layout, Response, Sense, Ui, Vec2};

/// Height of the header row
pub const TITLE_BAR_HEIGHT: f32 = 32.0;
const BUTTON_WIDTH: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleBarAction {
    StartDrag,
    Minimize,
    ToggleMaximize,
    Close,
}

/// A window button drawn on the right of the title bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowControl {
    Minimize,
    Maximize,
    Restore,
    Close,
}

impl WindowControl {
    fn glyph(self) -> &'static str {
        match self {
            WindowControl::Minimize => "🗕",
            WindowControl::Maximize => "🗖",
            WindowControl::Restore => "🗗",
            WindowControl::Close => "🗙",
        }
    }

    fn action(self) -> TitleBarAction {
        match self {
            WindowControl::Minimize => TitleBarAction::Minimize,
            WindowControl::Maximize | WindowControl::Restore => TitleBarAction::ToggleMaximize,
            WindowControl::Close => TitleBarAction::Close,
        }
    }
}

/// Buttons for the given mode, left to right; none in fullscreen
pub fn controls_for(mode: WindowMode) -> &'static [WindowControl] {
    match mode {
        WindowMode::Windowed => &[WindowControl::Minimize, WindowControl::Maximize, WindowControl::Close],
        WindowMode::Maximized => &[WindowControl::Minimize, WindowControl::Restore, WindowControl::Close],
        WindowMode::Fullscreen => &[],
    }
}

/// Title bar component
pub struct TitleBar;

impl TitleBar {
    /// Render into `ui`, which should span the header row
    ///
    /// `show_controls` is false in fullscreen and where the OS draws its
    /// own buttons (macOS, which also gets the bare title).
    pub fn ui(
        ui: &mut Ui,
        theme: &Theme,
        title: &str,
        mode: WindowMode,
        show_controls: bool,
    ) -> Option<TitleBarAction> {
        let mut action = None;
        let rect = ui.max_rect();

        // Drag region first so the buttons drawn later sit on top of it
        let drag = ui.interact(rect, ui.id().with("title_bar"), Sense::click_and_drag());
        if drag.double_clicked() {
            action = Some(TitleBarAction::ToggleMaximize);
        } else if drag.drag_started_by(egui::PointerButton::Primary) {
            action = Some(TitleBarAction::StartDrag);
        }

        let caption = if !cfg!(target_os = "macos") {
            format!("🗀 {}", title)
        } else {
            title.to_string()
        };
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            caption,
            FontId::proportional(15.0),
            theme.text,
        );

        if show_controls {
            ui.allocate_new_ui(
                egui::UiBuilder::new()
                    .max_rect(rect)
                    .layout(Layout::right_to_left(Align::Center)),
                |ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    // Right-to-left layout: iterate from the close button
                    for control in controls_for(mode).iter().rev() {
                        let hover = if *control == WindowControl::Close {
                            theme.close_hover
                        } else {
                            theme.hover
                        };
                        if control_button(ui, theme, control.glyph(), hover).clicked() {
                            action = Some(control.action());
                        }
                    }
                },
            );
        }

        action
    }
}

fn control_button(ui: &mut Ui, theme: &Theme, glyph: &str, hover: Color32) -> Response {
    let size = Vec2::new(BUTTON_WIDTH, ui.available_height());
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    let fill = if response.hovered() { hover } else { Color32::TRANSPARENT };

    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, fill);
    painter.text(rect.center(), Align2::CENTER_CENTER, glyph, FontId::proportional(14.0), theme.text);
    response
}
