//! Report file discovery, selection and decoding.
//!
//! Finds the `.json` files the tracker wrote, deduplicates them by name,
//! orders them by the timestamp embedded in each filename and decodes the
//! payloads into [`GrindReport`] structs for the aggregation store.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use tracker_core::diagnostics::Diagnostic;
use tracker_core::error::{Result, TrackerError};
use tracker_core::models::GrindReport;
use tracker_core::timestamp::{parse_filename_timestamp, REPORT_EXTENSION};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all report files recursively under `reports_dir`, sorted by path.
pub fn find_report_files(reports_dir: &Path) -> Vec<PathBuf> {
    if !reports_dir.exists() {
        warn!("Reports directory does not exist: {}", reports_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(reports_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == REPORT_EXTENSION)
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// A report file that survived deduplication and timestamp extraction.
///
/// The payload is still unread at this point.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    /// Session stamp recovered from the filename.
    pub timestamp: NaiveDateTime,
    /// Bare filename, the deduplication key.
    pub filename: String,
    /// Full path for the later payload read.
    pub path: PathBuf,
}

/// Deduplicate and chronologically order a batch of candidate files.
///
/// * A filename seen before is skipped with a [`Diagnostic::DuplicateFile`]
///   (first occurrence wins).
/// * A filename with no parseable timestamp is skipped with a
///   [`Diagnostic::MalformedTimestamp`]; a file that cannot be ordered
///   cannot be processed.
///
/// Survivors are sorted ascending by timestamp, ties broken by filename
/// so the ordering is deterministic.
pub fn select_report_files(
    candidates: &[PathBuf],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<SelectedFile> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut selected: Vec<SelectedFile> = Vec::new();

    for path in candidates {
        let filename = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => continue,
        };

        if !seen.insert(filename.clone()) {
            warn!("Duplicate filename detected: {}. Skipping.", filename);
            diagnostics.push(Diagnostic::DuplicateFile { filename });
            continue;
        }

        match parse_filename_timestamp(&filename) {
            Ok(timestamp) => selected.push(SelectedFile {
                timestamp,
                filename,
                path: path.clone(),
            }),
            Err(_) => {
                diagnostics.push(Diagnostic::MalformedTimestamp { filename });
            }
        }
    }

    selected.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.filename.cmp(&b.filename))
    });

    debug!(
        "Selected {} of {} candidate files",
        selected.len(),
        candidates.len()
    );

    selected
}

/// Open and decode a single report payload.
pub fn load_report(path: &Path) -> Result<GrindReport> {
    let content = std::fs::read_to_string(path).map_err(|source| TrackerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
