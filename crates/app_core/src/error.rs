//! Application error types

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Recoverable Errors (UI keeps its previous state) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Preference store unavailable: {0}")]
    PreferenceStoreUnavailable(String),

    // ===== Fatal Errors (application termination) =====
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl AppError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::FileNotFound(_)
                | AppError::AccessDenied(_)
                | AppError::InvalidPath(_)
                | AppError::PreferenceStoreUnavailable(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }
}

impl From<app_fs::FsError> for AppError {
    fn from(e: app_fs::FsError) -> Self {
        match e {
            app_fs::FsError::NotFound(p) => AppError::FileNotFound(p),
            app_fs::FsError::AccessDenied(p) => AppError::AccessDenied(p),
            app_fs::FsError::InvalidPath(p) => AppError::InvalidPath(p),
            app_fs::FsError::Io(e) => AppError::Io(e),
            app_fs::FsError::SpecialDirectoryUnavailable(kind) => {
                AppError::FileNotFound(format!("special directory {}", kind))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_error_conversion() {
        let err: AppError = app_fs::FsError::AccessDenied("/root".into()).into();
        assert!(matches!(err, AppError::AccessDenied(ref p) if p == "/root"));
        assert!(err.is_recoverable());

        let err: AppError = app_fs::FsError::NotFound("/gone".into()).into();
        assert!(matches!(err, AppError::FileNotFound(_)));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(AppError::Init("no window".into()).is_fatal());
        assert!(AppError::Config("bad".into()).is_fatal());
        assert!(!AppError::PreferenceStoreUnavailable("locked".into()).is_fatal());
    }
}
