//! Application configuration

use app_fs::SpecialDirectory;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::command::CommandId;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub browser: BrowserConfig,
    pub logging: LoggingConfig,
    pub keybindings: HashMap<String, Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            browser: BrowserConfig::default(),
            logging: LoggingConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub start_maximized: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Binder".to_string(),
            width: 1100,
            height: 700,
            start_maximized: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Folder opened at startup
    pub start_directory: SpecialDirectory,
    /// Longer item names are cut and suffixed with "..."
    pub name_display_limit: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            start_directory: SpecialDirectory::Documents,
            name_display_limit: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by RUST_LOG
    pub level: String,
    pub retention_days: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            retention_days: 7,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`; defaults if missing or unreadable
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!("Using default configuration");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match toml::from_str::<Self>(&content) {
            Ok(mut config) => {
                // Commands missing from the file keep their default bindings
                for (id, keys) in default_keybindings() {
                    config.keybindings.entry(id).or_insert(keys);
                }
                tracing::info!("Configuration loaded from {:?}", path);
                Ok(config)
            }
            Err(e) => {
                tracing::warn!("Invalid configuration {:?}, using defaults: {}", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "Binder", "Binder")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

pub fn default_keybindings() -> HashMap<String, Vec<String>> {
    let mut kb = HashMap::new();

    // History
    kb.insert(CommandId::NAV_BACK.into(), vec!["Alt+Left".into(), "MouseBack".into()]);
    kb.insert(CommandId::NAV_FORWARD.into(), vec!["Alt+Right".into(), "MouseForward".into()]);
    kb.insert(CommandId::NAV_PARENT.into(), vec!["Alt+Up".into(), "Backspace".into()]);

    // Appearance
    kb.insert(CommandId::VIEW_TOGGLE_THEME.into(), vec!["Ctrl+d".into()]);

    // Window
    kb.insert(CommandId::WINDOW_MINIMIZE.into(), vec![]);
    kb.insert(CommandId::WINDOW_TOGGLE_MAXIMIZE.into(), vec!["F11".into()]);
    kb.insert(CommandId::APP_EXIT.into(), vec!["Alt+F4".into()]);

    kb
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.window.title, "Binder");
        assert_eq!((config.window.width, config.window.height), (1100, 700));
        assert_eq!(config.browser.start_directory, SpecialDirectory::Documents);
        assert_eq!(config.browser.name_display_limit, 40);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.keybindings[CommandId::NAV_BACK][0], "Alt+Left");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = AppConfig::default();
        config.window.start_maximized = true;
        config.browser.start_directory = SpecialDirectory::Home;
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[browser]\nstart_directory = \"downloads\"\n\n[keybindings]\n\"nav.back\" = [\"b\"]\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.browser.start_directory, SpecialDirectory::Downloads);
        assert_eq!(config.browser.name_display_limit, 40);
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.keybindings[CommandId::NAV_BACK], vec!["b".to_string()]);
        assert!(config.keybindings.contains_key(CommandId::VIEW_TOGGLE_THEME));
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "window = 3").unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());
    }
}
