//! Layout of the undecorated window: header, gutters, content, footer

use egui::{Rect, Vec2};

use super::title_bar::TITLE_BAR_HEIGHT;

pub const FOOTER_HEIGHT: f32 = 32.0;
/// Side gutter beside the browser pane
pub const GUTTER: f32 = 56.0;
/// Right gutter on narrow windows
pub const NARROW_GUTTER: f32 = 5.0;
/// Below this width the right gutter shrinks
pub const NARROW_WIDTH: f32 = 640.0;
const CONTENT_MARGIN_Y: f32 = 4.0;

/// Regions of the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowLayout {
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
}

impl WindowLayout {
    pub fn split(window: Rect) -> Self {
        let header = Rect::from_min_size(window.min, Vec2::new(window.width(), TITLE_BAR_HEIGHT));
        let footer = Rect::from_min_max(
            window.left_bottom() - Vec2::new(0.0, FOOTER_HEIGHT),
            window.max,
        );

        let right_gutter = if window.width() < NARROW_WIDTH {
            NARROW_GUTTER
        } else {
            GUTTER
        };
        let content = Rect::from_min_max(
            egui::pos2(window.min.x + GUTTER, header.max.y + CONTENT_MARGIN_Y),
            egui::pos2(window.max.x - right_gutter, footer.min.y - CONTENT_MARGIN_Y),
        );

        Self {
            header,
            content,
            footer,
        }
    }
}
