//! Input handling and keybinding resolution

use app_core::Command;
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{Key, ModifiersState, NamedKey};

/// Input handler that maps keys/mouse to commands
pub struct InputHandler {
    /// Key bindings: lowercased key string -> command
    bindings: HashMap<String, Command>,

    /// Current modifier state
    modifiers: ModifiersState,
}

impl InputHandler {
    /// Create a new input handler from the command -> keys table
    pub fn new(bindings: &HashMap<String, Vec<String>>) -> Self {
        let mut key_to_command = HashMap::new();

        for (id, keys) in bindings {
            let Some(command) = Command::from_id(id) else {
                tracing::warn!("Ignoring bindings for unknown command {}", id);
                continue;
            };
            for key in keys {
                key_to_command.insert(key.to_lowercase(), command);
            }
        }

        Self {
            bindings: key_to_command,
            modifiers: ModifiersState::empty(),
        }
    }

    /// Update modifier state
    pub fn update_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    /// Handle a key event and return the corresponding command
    pub fn handle_key(&self, event: &KeyEvent) -> Option<Command> {
        if event.state != ElementState::Pressed {
            return None;
        }
        self.resolve(&key_to_string(&event.logical_key))
    }

    /// Handle mouse button presses (history buttons)
    pub fn handle_mouse_button(&self, button: MouseButton, state: ElementState) -> Option<Command> {
        if state != ElementState::Pressed {
            return None;
        }
        match button {
            MouseButton::Back => self.lookup("MouseBack"),
            MouseButton::Forward => self.lookup("MouseForward"),
            _ => None,
        }
    }

    fn resolve(&self, key: &str) -> Option<Command> {
        if key.is_empty() {
            return None;
        }
        let full_key = self.build_key_string(key);
        let command = self.lookup(&full_key);
        if let Some(command) = command {
            tracing::debug!("Key {} -> {}", full_key, command.id());
        }
        command
    }

    fn lookup(&self, key: &str) -> Option<Command> {
        self.bindings.get(&key.to_lowercase()).copied()
    }

    /// Build a key string with modifiers
    fn build_key_string(&self, key: &str) -> String {
        let mut parts = Vec::new();

        if self.modifiers.control_key() {
            parts.push("Ctrl");
        }
        if self.modifiers.alt_key() {
            parts.push("Alt");
        }
        if self.modifiers.shift_key() {
            parts.push("Shift");
        }
        if self.modifiers.super_key() {
            parts.push("Super");
        }

        parts.push(key);
        parts.join("+")
    }
}

/// Mouse back/forward buttons
///
/// egui claims every pointer event over its panels, so these are routed
/// before egui sees them.
pub fn is_history_button(button: MouseButton) -> bool {
    matches!(button, MouseButton::Back | MouseButton::Forward)
}

/// Convert a logical key to its binding name
fn key_to_string(key: &Key) -> String {
    match key {
        Key::Named(named) => match named {
            NamedKey::Space => "Space".to_string(),
            NamedKey::Enter => "Return".to_string(),
            NamedKey::Escape => "Escape".to_string(),
            NamedKey::Backspace => "Backspace".to_string(),
            NamedKey::ArrowUp => "Up".to_string(),
            NamedKey::ArrowDown => "Down".to_string(),
            NamedKey::ArrowLeft => "Left".to_string(),
            NamedKey::ArrowRight => "Right".to_string(),
            NamedKey::BrowserBack => "MouseBack".to_string(),
            NamedKey::BrowserForward => "MouseForward".to_string(),
            _ => format!("{:?}", named),
        },
        Key::Character(c) => c.to_string(),
        _ => String::new(),
    }
}
