//! Dark/light theme state backed by the preference store

use crate::preferences::PreferenceStore;
use crate::tasks::{deadline_after, Spawner, TaskQueue};
use crate::AppError;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Preference key holding the dark-mode flag
pub const DARK_MODE_KEY: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn toggled(self) -> Self {
        Self::from_dark(!self.is_dark())
    }
}

/// Stored value to mode; only an explicit `false` selects light
pub fn mode_from_preference(value: Result<Option<Value>, AppError>) -> ThemeMode {
    match value {
        Ok(Some(Value::Bool(dark))) => ThemeMode::from_dark(dark),
        Ok(Some(other)) => {
            tracing::warn!("Ignoring non-boolean {} preference: {}", DARK_MODE_KEY, other);
            ThemeMode::Dark
        }
        Ok(None) => ThemeMode::Dark,
        Err(e) => {
            tracing::warn!("Failed to read theme preference: {}", e);
            ThemeMode::Dark
        }
    }
}

#[derive(Debug)]
pub enum ThemeEvent {
    Loaded(Result<Option<Value>, AppError>),
    Written(ThemeMode, Result<(), AppError>),
}

/// Theme toggle controller
pub struct ThemeToggle {
    store: Arc<dyn PreferenceStore>,
    mode: ThemeMode,
    loading: bool,
    /// A write is in flight; further toggles are ignored until it resolves
    writing: bool,
    tasks: TaskQueue<ThemeEvent>,
}

impl ThemeToggle {
    /// Starts in dark mode and loads the stored preference in the background
    pub fn new(store: Arc<dyn PreferenceStore>, spawner: Spawner) -> Self {
        let mut tasks = TaskQueue::new(spawner);
        let loader = store.clone();
        tasks.spawn(async move { ThemeEvent::Loaded(loader.get(DARK_MODE_KEY).await) });

        Self {
            store,
            mode: ThemeMode::Dark,
            loading: true,
            writing: false,
            tasks,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn is_pending(&self) -> bool {
        self.writing
    }

    /// Persist the opposite mode; the displayed mode flips once the write succeeds
    pub fn toggle(&mut self) {
        if self.writing {
            tracing::debug!("Theme write already in flight, toggle ignored");
            return;
        }
        self.writing = true;

        let next = self.mode.toggled();
        let store = self.store.clone();
        self.tasks.spawn(async move {
            let result = store.set(DARK_MODE_KEY, Value::Bool(next.is_dark())).await;
            ThemeEvent::Written(next, result)
        });
    }

    /// Apply finished store operations; true if anything changed
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(event) = self.tasks.try_next() {
            changed |= self.handle(event);
        }
        changed
    }

    /// Wait for outstanding store operations, for startup and tests
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = deadline_after(timeout);
        let mut changed = false;
        while !self.tasks.is_idle() {
            match self.tasks.next_before(deadline) {
                Some(event) => changed |= self.handle(event),
                None => break,
            }
        }
        changed
    }

    fn handle(&mut self, event: ThemeEvent) -> bool {
        match event {
            ThemeEvent::Loaded(value) => {
                if !self.loading {
                    return false;
                }
                self.loading = false;
                let mode = mode_from_preference(value);
                let changed = mode != self.mode;
                self.mode = mode;
                changed
            }
            ThemeEvent::Written(mode, result) => {
                self.writing = false;
                match result {
                    Ok(()) => {
                        // A stored value read before this write is outdated now
                        self.loading = false;
                        tracing::info!("Theme set to {:?}", mode);
                        let changed = mode != self.mode;
                        self.mode = mode;
                        changed
                    }
                    Err(e) => {
                        tracing::warn!("Failed to persist theme {:?}: {}", mode, e);
                        false
                    }
                }
            }
        }
    }
}
