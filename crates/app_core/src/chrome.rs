//! Window chrome state - window mode tracking and the resize subscription

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// How the window currently occupies the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    #[default]
    Windowed,
    Maximized,
    Fullscreen,
}

impl WindowMode {
    /// Corners are only rounded for a free-floating window
    pub fn rounded_corners(self) -> bool {
        self == WindowMode::Windowed
    }
}

/// Callback run on every window geometry change
pub type ResizeCallback = Box<dyn Fn(&dyn WindowService) + Send + Sync>;

type Listeners = Mutex<Vec<(u64, ResizeCallback)>>;

/// Native window controls
pub trait WindowService: Send + Sync {
    fn minimize(&self);
    fn maximize(&self);
    fn unmaximize(&self);
    fn close(&self);
    fn is_maximized(&self) -> bool;
    fn is_fullscreen(&self) -> bool;

    /// Register a resize callback; it stays registered until the guard drops
    fn subscribe_resize(&self, callback: ResizeCallback) -> ResizeSubscription;

    /// Begin an OS-driven window move (title bar drag)
    fn start_drag(&self) {}
}

/// Fan-out of resize notifications, for WindowService implementations
#[derive(Default)]
pub struct ResizeNotifier {
    listeners: Arc<Listeners>,
    next_id: AtomicU64,
}

impl ResizeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: ResizeCallback) -> ResizeSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, callback));
        ResizeSubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Run every registered callback; callbacks must not (un)subscribe
    pub fn notify(&self, window: &dyn WindowService) {
        for (_, callback) in self.listeners.lock().iter() {
            callback(window);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

/// Scoped resize registration, released on drop
#[must_use = "dropping the subscription unregisters the callback"]
pub struct ResizeSubscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

/// Query the window for its current mode; maximized wins over fullscreen
pub fn mode_of(window: &dyn WindowService) -> WindowMode {
    if window.is_maximized() {
        WindowMode::Maximized
    } else if window.is_fullscreen() {
        WindowMode::Fullscreen
    } else {
        WindowMode::Windowed
    }
}

/// Title bar controller
pub struct WindowChrome {
    window: Arc<dyn WindowService>,
    mode: Arc<Mutex<WindowMode>>,
    /// The OS draws the window buttons itself (macOS)
    native_controls: bool,
    _resize: ResizeSubscription,
}

impl WindowChrome {
    pub fn new(window: Arc<dyn WindowService>, native_controls: bool) -> Self {
        let initial = if window.is_maximized() {
            WindowMode::Maximized
        } else {
            WindowMode::Windowed
        };
        let mode = Arc::new(Mutex::new(initial));

        let tracked = mode.clone();
        let resize = window.subscribe_resize(Box::new(move |window| {
            let next = mode_of(window);
            let mut current = tracked.lock();
            if *current != next {
                tracing::debug!("Window mode {:?} -> {:?}", *current, next);
                *current = next;
            }
        }));

        Self {
            window,
            mode,
            native_controls,
            _resize: resize,
        }
    }

    pub fn mode(&self) -> WindowMode {
        *self.mode.lock()
    }

    pub fn rounded_corners(&self) -> bool {
        self.mode().rounded_corners()
    }

    /// Minimize/maximize/close buttons are drawn by us
    pub fn shows_controls(&self) -> bool {
        !self.native_controls && self.mode() != WindowMode::Fullscreen
    }

    pub fn minimize(&self) {
        self.window.minimize();
    }

    pub fn toggle_maximize(&self) {
        let mut mode = self.mode.lock();
        match *mode {
            WindowMode::Windowed => {
                self.window.maximize();
                *mode = WindowMode::Maximized;
            }
            WindowMode::Maximized => {
                self.window.unmaximize();
                *mode = WindowMode::Windowed;
            }
            WindowMode::Fullscreen => {}
        }
    }

    pub fn close(&self) {
        tracing::info!("Close requested from title bar");
        self.window.close();
    }

    pub fn start_drag(&self) {
        self.window.start_drag();
    }
}
