use std::path::Path;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tracker_core::error::{Result, TrackerError};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Reports-directory check ────────────────────────────────────────────────────

/// Verify that the reports directory exists before running the pipeline.
///
/// A missing directory is the caller's mistake, not a skip-and-continue
/// condition, so it fails up front with a clear error.
pub fn check_reports_dir(reports_dir: &Path) -> Result<()> {
    if reports_dir.is_dir() {
        Ok(())
    } else {
        Err(TrackerError::ReportsDirNotFound(reports_dir.to_path_buf()))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
