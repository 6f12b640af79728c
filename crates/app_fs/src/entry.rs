//! Directory listing - one entry per immediate child

use crate::{FsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    /// True when the entry has enumerable children (a directory)
    pub is_container: bool,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>, is_container: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_container,
        }
    }

    /// Build an entry from a path, following symlinks to decide whether it is a container
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        // A dangling symlink has no target metadata; list it as a plain file
        let is_container = fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false);

        Self {
            name,
            path: path.to_string_lossy().to_string(),
            is_container,
        }
    }
}

/// List the immediate children of a directory, in the order the OS returns them
pub fn read_entries<P: AsRef<Path>>(path: P) -> Result<Vec<DirectoryEntry>> {
    let path = path.as_ref();
    let path_display = path.to_string_lossy();

    let read_dir = fs::read_dir(path).map_err(|e| FsError::from_io(e, &path_display))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(entry) => entries.push(DirectoryEntry::from_path(entry.path())),
            Err(e) => tracing::debug!("Skipping unreadable entry in {}: {}", path_display, e),
        }
    }

    Ok(entries)
}
