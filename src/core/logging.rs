//! Logging initialization.
//!
//! The TUI owns the terminal, so nothing may write to stdout: all log
//! output goes to a daily-rolling file under the app data directory.
//! Standard `log` macro records are bridged into `tracing` so the rest
//! of the crate can keep using `log::info!` and friends.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging system.
///
/// Installs an `EnvFilter` (from `RUST_LOG`, defaulting to `info`) and a
/// non-blocking JSON file layer writing to `<data_dir>/logs/`.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of
/// the application so buffered logs are flushed on shutdown.
pub fn init(data_dir: &Path) -> WorkerGuard {
    let log_dir = data_dir.join("logs");
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {e}");
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, "campaign-companion.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_target(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(file_layer).init();

    // Redirect standard `log` macros to `tracing`.
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {e}");
    }

    log::info!("Logging initialized. Writing to: {}", log_dir.display());

    guard
}
