//! Well-known user directories

use crate::{FsError, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Platform special folders offered as navigation shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialDirectory {
    Documents,
    Desktop,
    Downloads,
    Home,
    Pictures,
    Videos,
}

impl SpecialDirectory {
    /// Every kind, in address-bar suggestion order
    pub const ALL: [SpecialDirectory; 6] = [
        SpecialDirectory::Documents,
        SpecialDirectory::Desktop,
        SpecialDirectory::Downloads,
        SpecialDirectory::Home,
        SpecialDirectory::Pictures,
        SpecialDirectory::Videos,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SpecialDirectory::Documents => "documents",
            SpecialDirectory::Desktop => "desktop",
            SpecialDirectory::Downloads => "downloads",
            SpecialDirectory::Home => "home",
            SpecialDirectory::Pictures => "pictures",
            SpecialDirectory::Videos => "videos",
        }
    }

    /// Look the directory up for the current user
    pub fn resolve(&self) -> Result<PathBuf> {
        let dirs = UserDirs::new()
            .ok_or_else(|| FsError::SpecialDirectoryUnavailable("no home directory".into()))?;

        let path = match self {
            SpecialDirectory::Documents => dirs.document_dir(),
            SpecialDirectory::Desktop => dirs.desktop_dir(),
            SpecialDirectory::Downloads => dirs.download_dir(),
            SpecialDirectory::Home => Some(dirs.home_dir()),
            SpecialDirectory::Pictures => dirs.picture_dir(),
            SpecialDirectory::Videos => dirs.video_dir(),
        };

        path.map(|p| p.to_path_buf())
            .ok_or_else(|| FsError::SpecialDirectoryUnavailable(self.label().to_string()))
    }
}
