//! DroidFiler - file manager for local disk and Android devices
//!
//! Command-line entry point. The GUI front end talks to the same
//! FileManager surface this binary drives.

mod app;

use anyhow::Result;

fn main() -> Result<()> {
    // Initialize logging and panic hook first
    app_log::init()?;

    // Clean up old logs (7 days)
    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("DroidFiler starting...");

    // Load configuration
    let config = app_core::AppConfig::load().unwrap_or_default();

    app::run(config)
}
