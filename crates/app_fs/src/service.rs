//! Directory service - the async filesystem surface consumed by the browser

use crate::{entry, path, DirectoryEntry, FsError, Result, SpecialDirectory};
use async_trait::async_trait;
use std::path::PathBuf;

/// Read-only filesystem operations needed to browse directories
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Non-recursive listing of `path`
    async fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>>;

    /// Whether `path` exists; any failure counts as absent
    async fn path_exists(&self, path: &str) -> bool;

    /// Resolve a well-known user directory
    async fn special_directory(&self, kind: SpecialDirectory) -> Result<String>;

    fn join_path(&self, base: &str, segment: &str) -> String {
        path::join_path(base, segment)
    }

    fn normalize_path(&self, path: &str) -> String {
        path::normalize_path(path)
    }
}

/// DirectoryService backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDirectoryService;

impl NativeDirectoryService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DirectoryService for NativeDirectoryService {
    async fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>> {
        let target = PathBuf::from(path);
        tokio::task::spawn_blocking(move || entry::read_entries(target))
            .await
            .map_err(|e| FsError::Io(std::io::Error::other(e)))?
    }

    async fn path_exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn special_directory(&self, kind: SpecialDirectory) -> Result<String> {
        kind.resolve().map(|p| p.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_native_listing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Music")).unwrap();
        fs::write(dir.path().join("song.txt"), b"la").unwrap();

        let service = NativeDirectoryService::new();
        let root = dir.path().to_string_lossy().to_string();
        let entries = service.list_directory(&root).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries.iter().filter(|e| e.is_container).count(), 1);
    }

    #[tokio::test]
    async fn test_exists_biased_toward_directories() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        let file = dir.path().join("file.txt");
        fs::create_dir(&sub).unwrap();
        fs::write(&file, b"x").unwrap();

        let service = NativeDirectoryService::new();
        let sub = path::with_trailing_separator(&sub.to_string_lossy());
        let missing = path::with_trailing_separator(&dir.path().join("gone").to_string_lossy());

        assert!(service.path_exists(&sub).await);
        assert!(!service.path_exists(&missing).await);
        assert!(service.path_exists(&file.to_string_lossy()).await);
    }

    #[tokio::test]
    async fn test_missing_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing").to_string_lossy().to_string();

        let service = NativeDirectoryService::new();
        let err = service.list_directory(&missing).await.unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }
}
