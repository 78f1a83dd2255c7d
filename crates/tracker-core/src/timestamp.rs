//! Filename timestamp extraction.
//!
//! Report files are named after their session stamp, e.g.
//! `"23-03-2024 13-28-12.json"`. The stamp is zone-less local wall-clock
//! time, so it parses to a [`NaiveDateTime`].

use chrono::NaiveDateTime;
use tracing::warn;

use crate::error::{Result, TrackerError};

/// File extension carried by every report the tracker writes.
pub const REPORT_EXTENSION: &str = "json";

/// The fixed stamp pattern embedded in report filenames.
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H-%M-%S";

/// Parse the session timestamp out of a report filename.
///
/// Strips the `.json` extension and parses the remaining stem against
/// [`FILENAME_TIMESTAMP_FORMAT`]. A missing extension, wrong token count,
/// non-numeric field or out-of-range date all fail the same way: with
/// [`TrackerError::MalformedTimestamp`] naming the offending file.
pub fn parse_filename_timestamp(filename: &str) -> Result<NaiveDateTime> {
    let stem = filename
        .strip_suffix(&format!(".{}", REPORT_EXTENSION))
        .ok_or_else(|| malformed(filename))?;

    NaiveDateTime::parse_from_str(stem, FILENAME_TIMESTAMP_FORMAT)
        .map_err(|_| malformed(filename))
}

fn malformed(filename: &str) -> TrackerError {
    warn!("Could not parse timestamp from filename: {}", filename);
    TrackerError::MalformedTimestamp(filename.to_string())
}

/// Format a timestamp back into the filename stem form.
///
/// Inverse of [`parse_filename_timestamp`] modulo the extension.
pub fn format_filename_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(FILENAME_TIMESTAMP_FORMAT).to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
