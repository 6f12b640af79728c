//! UI Components

pub mod file_browser;
pub mod theme_toggle;
pub mod title_bar;
pub mod window_frame;

pub use file_browser::{item_label, BrowserAction, FileBrowser};
pub use theme_toggle::ThemeSwitch;
pub use title_bar::{TitleBar, TitleBarAction, WindowControl};
pub use window_frame::WindowLayout;
