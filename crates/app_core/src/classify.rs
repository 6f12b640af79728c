//! Sorting a raw listing into binders, folders and files

use app_fs::DirectoryEntry;

/// Name prefixes that promote a folder to a binder, checked in order
pub const BINDER_PREFIXES: [&str; 8] = [
    "Documents",
    "Desktop",
    "Downloads",
    "Music",
    "Pictures",
    "~",
    "0",
    "-",
];

/// A directory listing split into its three display groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedListing {
    pub binders: Vec<DirectoryEntry>,
    pub folders: Vec<DirectoryEntry>,
    pub files: Vec<DirectoryEntry>,
}

impl ClassifiedListing {
    /// Total number of entries across all groups
    pub fn len(&self) -> usize {
        self.binders.len() + self.folders.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Prefix match, not an exact allowlist: "DocumentsArchive" is a binder too
pub fn is_binder_name(name: &str) -> bool {
    BINDER_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Partition entries, keeping the service's order inside each group
pub fn classify(entries: Vec<DirectoryEntry>) -> ClassifiedListing {
    let mut listing = ClassifiedListing::default();

    for entry in entries {
        if entry.is_container && is_binder_name(&entry.name) {
            listing.binders.push(entry);
        } else if entry.is_container {
            listing.folders.push(entry);
        } else {
            listing.files.push(entry);
        }
    }

    listing
}
