//! Binder Core Domain Logic
//!
//! This crate contains:
//! - Navigation history and listing classification
//! - Address bar state
//! - Window chrome and theme state
//! - Command system
//! - Configuration
//! - Error types
//!
//! Nothing here touches the UI toolkit. Collaborators (directory access,
//! window control, preferences) are injected as trait objects.

pub mod address_bar;
pub mod appearance;
pub mod browser;
pub mod chrome;
pub mod classify;
pub mod command;
pub mod config;
pub mod error;
pub mod navigation;
pub mod preferences;
pub mod tasks;

pub use address_bar::AddressBar;
pub use appearance::{ThemeMode, ThemeToggle, DARK_MODE_KEY};
pub use browser::FileBrowserModel;
pub use chrome::{
    mode_of, ResizeCallback, ResizeNotifier, ResizeSubscription, WindowChrome, WindowMode,
    WindowService,
};
pub use classify::{classify, is_binder_name, ClassifiedListing, BINDER_PREFIXES};
pub use command::{Command, CommandId};
pub use config::{AppConfig, BrowserConfig, LoggingConfig, WindowConfig};
pub use error::AppError;
pub use navigation::{FetchOutcome, FetchRequest, FetchTarget, Listing, NavigationState};
pub use preferences::{JsonPreferenceStore, PreferenceStore};
pub use tasks::{Spawner, TaskQueue, Waker};
