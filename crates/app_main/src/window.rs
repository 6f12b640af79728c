//! winit-backed window controls

use app_core::{ResizeCallback, ResizeNotifier, ResizeSubscription, WindowService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use winit::window::Window;

/// Window service over the single application window
///
/// Closing only raises a flag; the event loop exits when it sees it.
pub struct WinitWindowService {
    window: Arc<Window>,
    close_requested: AtomicBool,
    resize: ResizeNotifier,
}

impl WinitWindowService {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            close_requested: AtomicBool::new(false),
            resize: ResizeNotifier::new(),
        }
    }

    /// Forward a geometry change to the subscribers
    pub fn notify_resized(&self) {
        self.resize.notify(self);
    }

    pub fn take_close_request(&self) -> bool {
        self.close_requested.swap(false, Ordering::SeqCst)
    }
}

impl WindowService for WinitWindowService {
    fn minimize(&self) {
        self.window.set_minimized(true);
    }

    fn maximize(&self) {
        self.window.set_maximized(true);
    }

    fn unmaximize(&self) {
        self.window.set_maximized(false);
    }

    fn close(&self) {
        self.close_requested.store(true, Ordering::SeqCst);
    }

    fn is_maximized(&self) -> bool {
        self.window.is_maximized()
    }

    fn is_fullscreen(&self) -> bool {
        self.window.fullscreen().is_some()
    }

    fn subscribe_resize(&self, callback: ResizeCallback) -> ResizeSubscription {
        self.resize.subscribe(callback)
    }

    fn start_drag(&self) {
        if let Err(e) = self.window.drag_window() {
            tracing::warn!("Window drag not available: {}", e);
        }
    }
}
