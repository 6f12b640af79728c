//! Command system for user actions

/// Command identifiers as used in the keybinding table
pub struct CommandId;

impl CommandId {
    // Navigation commands
    pub const NAV_BACK: &'static str = "nav.back";
    pub const NAV_FORWARD: &'static str = "nav.forward";
    pub const NAV_PARENT: &'static str = "nav.parent";

    // View commands
    pub const VIEW_TOGGLE_THEME: &'static str = "view.toggle_theme";

    // Window commands
    pub const WINDOW_MINIMIZE: &'static str = "window.minimize";
    pub const WINDOW_TOGGLE_MAXIMIZE: &'static str = "window.toggle_maximize";

    // App commands
    pub const APP_EXIT: &'static str = "app.exit";
}

/// A user action, independent of how it was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Back,
    Forward,
    Parent,
    ToggleTheme,
    Minimize,
    ToggleMaximize,
    Exit,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Back,
        Command::Forward,
        Command::Parent,
        Command::ToggleTheme,
        Command::Minimize,
        Command::ToggleMaximize,
        Command::Exit,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Command::Back => CommandId::NAV_BACK,
            Command::Forward => CommandId::NAV_FORWARD,
            Command::Parent => CommandId::NAV_PARENT,
            Command::ToggleTheme => CommandId::VIEW_TOGGLE_THEME,
            Command::Minimize => CommandId::WINDOW_MINIMIZE,
            Command::ToggleMaximize => CommandId::WINDOW_TOGGLE_MAXIMIZE,
            Command::Exit => CommandId::APP_EXIT,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_lookup() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_id(cmd.id()), Some(cmd));
        }
        assert_eq!(Command::from_id("nav.next_item"), None);
    }
}
