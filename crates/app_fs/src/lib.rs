//! Binder File System Abstraction Layer
//!
//! Provides the narrow filesystem surface the browser consumes:
//! - DirectoryEntry: one child of a listed directory
//! - DirectoryService: async listing, existence checks, special folders
//! - Lexical path join/normalize helpers
//! - Launcher: open a file with the system default handler

mod entry;
mod launcher;
mod path;
mod service;
mod special;

pub use entry::{read_entries, DirectoryEntry};
pub use launcher::{Launcher, SystemLauncher};
pub use path::{join_path, normalize_path, with_trailing_separator};
pub use service::{DirectoryService, NativeDirectoryService};
pub use special::SpecialDirectory;

use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Special directory unavailable: {0}")]
    SpecialDirectoryUnavailable(String),
}

impl FsError {
    /// Classify an I/O failure that happened while touching `path`
    pub fn from_io(err: std::io::Error, path: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_string()),
            std::io::ErrorKind::PermissionDenied => FsError::AccessDenied(path.to_string()),
            _ => FsError::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, FsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_mapping() {
        let err = FsError::from_io(io::Error::from(io::ErrorKind::NotFound), "/missing");
        assert!(matches!(err, FsError::NotFound(p) if p == "/missing"));

        let err = FsError::from_io(io::Error::from(io::ErrorKind::PermissionDenied), "/root");
        assert!(matches!(err, FsError::AccessDenied(p) if p == "/root"));

        let err = FsError::from_io(io::Error::from(io::ErrorKind::Interrupted), "/tmp");
        assert!(matches!(err, FsError::Io(_)));
    }
}
