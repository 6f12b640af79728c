//! Binder - a single-pane file browser in a custom window frame
//!
//! Main entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod window;

use anyhow::Result;

fn main() -> Result<()> {
    // Load configuration (logging is not up yet, so failures fall back silently)
    let config = app_core::AppConfig::load().unwrap_or_default();

    // Initialize logging and panic hook
    let _log_guard = app_log::init(&config.logging.level)?;

    if let Err(e) = app_log::cleanup_old_logs(config.logging.retention_days) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("Binder {} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Configuration file: {:?}", app_core::AppConfig::config_path());

    // Run the application
    app::run(config)
}
