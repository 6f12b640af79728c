//! Open files with the system default application

/// Hands a file over to the OS shell
pub trait Launcher: Send + Sync {
    /// Fire-and-forget; failures are logged, never reported back
    fn open_with_default(&self, path: &str);
}

/// Launcher using the platform opener (xdg-open, open, ShellExecute)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    #[cfg(feature = "open-external")]
    fn open_with_default(&self, path: &str) {
        tracing::info!("Opening with default application: {}", path);
        if let Err(e) = open::that_detached(path) {
            tracing::warn!("Failed to open {}: {}", path, e);
        }
    }

    #[cfg(not(feature = "open-external"))]
    fn open_with_default(&self, path: &str) {
        tracing::warn!("External open disabled, ignoring {}", path);
    }
}
