//! File browser pane: address bar, history buttons and the three item rows

use crate::theme::Theme;
use app_core::{AddressBar, ClassifiedListing, NavigationState};
use app_fs::DirectoryEntry;
use egui::{Align2, FontId, Frame, RichText, Sense, Stroke, Ui, Vec2};

const ITEM_WIDTH: f32 = 96.0;
const ICON_SIZE: f32 = 48.0;

/// Display name for an item: "???" when empty, cut to `limit` chars plus "..."
pub fn item_label(name: &str, limit: usize) -> String {
    if name.is_empty() {
        return "???".to_string();
    }
    if name.chars().count() > limit {
        let mut label: String = name.chars().take(limit).collect();
        label.push_str("...");
        label
    } else {
        name.to_string()
    }
}

/// Browser action
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserAction {
    /// Go to the parent folder
    BackOut,
    Back,
    Forward,
    /// Validate the address field text
    CommitAddress,
    Open(DirectoryEntry),
}

/// File browser component
pub struct FileBrowser {
    /// Longest item name shown in full
    pub name_limit: usize,
    suggestions_open: bool,
}

impl FileBrowser {
    pub fn new(name_limit: usize) -> Self {
        Self {
            name_limit,
            suggestions_open: false,
        }
    }

    /// Render the file browser
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        theme: &Theme,
        navigation: &NavigationState,
        address: &mut AddressBar,
        suggestions: &[String],
    ) -> Option<BrowserAction> {
        let mut action = self.nav_row(ui, theme, navigation, address, suggestions);

        let empty = ClassifiedListing::default();
        let listing = navigation.listing().loaded().unwrap_or(&empty);

        ui.add_space(4.0);
        let spacing = ui.spacing().item_spacing.y;
        let row_height = ((ui.available_height() - 2.0 * spacing) / 3.0).max(ICON_SIZE + 32.0);

        for (salt, entries) in [
            ("binders", &listing.binders),
            ("folders", &listing.folders),
            ("files", &listing.files),
        ] {
            if let Some(row_action) = self.item_row(ui, theme, salt, entries, row_height) {
                action = Some(row_action);
            }
        }

        action
    }

    fn nav_row(
        &mut self,
        ui: &mut Ui,
        theme: &Theme,
        navigation: &NavigationState,
        address: &mut AddressBar,
        suggestions: &[String],
    ) -> Option<BrowserAction> {
        let mut action = None;

        Frame::none()
            .stroke(Stroke::new(1.0, theme.border))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("...").on_hover_text("Up one level").clicked() {
                        action = Some(BrowserAction::BackOut);
                    }

                    let field_width = (ui.available_width() - 64.0).max(80.0);
                    let response = ui.add_sized(
                        [field_width, 24.0],
                        egui::TextEdit::singleline(&mut address.path_text)
                            .font(FontId::proportional(16.0))
                            .hint_text("Path"),
                    );

                    if response.gained_focus() {
                        address.editing_path = true;
                        self.suggestions_open = true;
                    }
                    if response.changed() {
                        self.suggestions_open = true;
                    }

                    if response.has_focus() && self.suggestions_open {
                        if let Some(choice) = Self::suggestion_popup(ui, &response, address, suggestions) {
                            address.path_text = choice;
                            address.editing_path = false;
                            self.suggestions_open = false;
                            action = Some(BrowserAction::CommitAddress);
                        }
                    }

                    // Already committed if a suggestion was picked
                    if response.lost_focus() && address.editing_path {
                        self.suggestions_open = false;
                        action = Some(BrowserAction::CommitAddress);
                    }

                    ui.add_enabled_ui(navigation.can_go_back(), |ui| {
                        if ui.button("⬅").on_hover_text("Back (Alt+Left)").clicked() {
                            action = Some(BrowserAction::Back);
                        }
                    });
                    ui.add_enabled_ui(navigation.can_go_forward(), |ui| {
                        if ui.button("➡").on_hover_text("Forward (Alt+Right)").clicked() {
                            action = Some(BrowserAction::Forward);
                        }
                    });
                });
            });

        action
    }

    fn suggestion_popup(
        ui: &Ui,
        field: &egui::Response,
        address: &AddressBar,
        suggestions: &[String],
    ) -> Option<String> {
        let matches = address.matching(suggestions);
        if matches.is_empty() {
            return None;
        }

        let mut chosen = None;
        egui::Area::new(field.id.with("suggestions"))
            .order(egui::Order::Foreground)
            .fixed_pos(field.rect.left_bottom())
            .show(ui.ctx(), |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(field.rect.width());
                    egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                        for path in matches {
                            if ui.selectable_label(false, path).clicked() {
                                chosen = Some(path.to_string());
                            }
                        }
                    });
                });
            });
        chosen
    }

    fn item_row(
        &self,
        ui: &mut Ui,
        theme: &Theme,
        salt: &str,
        entries: &[DirectoryEntry],
        height: f32,
    ) -> Option<BrowserAction> {
        let mut action = None;

        Frame::none()
            .stroke(Stroke::new(1.0, theme.border))
            .inner_margin(4.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.set_height(height - 8.0);
                egui::ScrollArea::horizontal().id_salt(salt).show(ui, |ui| {
                    ui.horizontal_top(|ui| {
                        for entry in entries {
                            if self.item(ui, theme, entry).clicked() {
                                action = Some(BrowserAction::Open(entry.clone()));
                            }
                        }
                    });
                });
            });

        action
    }

    fn item(&self, ui: &mut Ui, theme: &Theme, entry: &DirectoryEntry) -> egui::Response {
        let label = item_label(&entry.name, self.name_limit);
        let glyph = if entry.is_container { "🗀" } else { "🗋" };

        ui.vertical(|ui| {
            ui.set_width(ITEM_WIDTH);
            let (icon_rect, _) = ui.allocate_exact_size(Vec2::new(ITEM_WIDTH, ICON_SIZE), Sense::hover());
            ui.painter().text(
                icon_rect.center(),
                Align2::CENTER_CENTER,
                glyph,
                FontId::proportional(ICON_SIZE * 0.8),
                theme.icon,
            );
            ui.vertical_centered(|ui| {
                ui.add(egui::Label::new(RichText::new(label).size(12.0)).wrap().selectable(false));
            });
        })
        .response
        .interact(Sense::click())
        .on_hover_text(&entry.path)
        .on_hover_cursor(egui::CursorIcon::PointingHand)
    }
}
