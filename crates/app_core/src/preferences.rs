//! Persistent key/value preferences

use crate::AppError;
use async_trait::async_trait;
use directories::ProjectDirs;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Async key/value store for user preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// `Ok(None)` when the key was never written
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), AppError>;
}

/// Preferences kept as one JSON object on disk
pub struct JsonPreferenceStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store in the platform config directory
    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        ProjectDirs::from("com", "Binder", "Binder")
            .map(|dirs| dirs.config_dir().join("preferences.json"))
            .unwrap_or_else(|| PathBuf::from("./preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>, AppError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(unavailable(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content).map_err(|e| unavailable(&self.path, e))? {
            Value::Object(map) => Ok(map),
            other => Err(AppError::PreferenceStoreUnavailable(format!(
                "{}: expected an object, found {}",
                self.path.display(),
                other
            ))),
        }
    }
}

fn unavailable(path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::PreferenceStoreUnavailable(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_all().await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_all().await?;
        map.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| unavailable(parent, e))?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| unavailable(&self.path, e))?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| unavailable(&self.path, e))?;

        tracing::debug!("Preference {} written to {:?}", key, self.path);
        Ok(())
    }
}
