//! Top-level analysis pipeline.
//!
//! Ties the reader, the aggregation store and the report builder together:
//! one pass over the sorted, deduplicated file batch, then both output
//! views. Every per-file failure is a diagnostic, never an abort.

use std::path::Path;

use chrono::Utc;
use tracing::warn;

use tracker_core::catalog::Catalog;
use tracker_core::diagnostics::Diagnostic;
use tracker_core::models::TimestampedReport;

use crate::aggregator::SessionAggregator;
use crate::reader::{find_report_files, load_report, select_report_files};
use crate::report::{build_average_report, build_session_report, AverageReport, SessionReport};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of report files found under the reports directory.
    pub files_discovered: usize,
    /// Number of files that decoded and were fed to the aggregator.
    pub files_ingested: usize,
    /// Wall-clock seconds spent on the whole pass.
    pub load_time_seconds: f64,
}

/// The complete output of [`analyze_reports`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportAnalysis {
    /// Chronological per-session listings.
    pub sessions: SessionReport,
    /// Per-hour drop averages.
    pub averages: AverageReport,
    /// Non-fatal warnings collected across the batch.
    pub diagnostics: Vec<Diagnostic>,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline over one reports directory.
///
/// 1. Discover `.json` files recursively under `reports_dir`.
/// 2. Deduplicate and order them by their filename timestamps.
/// 3. Decode each payload; failures are diagnosed and skipped.
/// 4. Feed every surviving report to the aggregation store, in order.
/// 5. Build the session and average views.
pub fn analyze_reports(reports_dir: &Path, catalog: &Catalog) -> ReportAnalysis {
    let start = std::time::Instant::now();

    let candidates = find_report_files(reports_dir);
    let files_discovered = candidates.len();

    let mut diagnostics = Vec::new();
    let selected = select_report_files(&candidates, &mut diagnostics);

    let mut aggregator = SessionAggregator::new(catalog);
    let mut files_ingested = 0usize;

    for file in selected {
        let report = match load_report(&file.path) {
            Ok(report) => report,
            Err(err) => {
                warn!("Error parsing {}: {}", file.filename, err);
                diagnostics.push(Diagnostic::DecodeFailure {
                    filename: file.filename,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        files_ingested += 1;

        let timestamped = TimestampedReport {
            timestamp: file.timestamp,
            filename: file.filename,
            report,
        };
        if let Some(diagnostic) = aggregator.ingest(timestamped) {
            diagnostics.push(diagnostic);
        }
    }

    let sessions = build_session_report(&aggregator);
    let averages = build_average_report(&aggregator);

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        files_discovered,
        files_ingested,
        load_time_seconds: start.elapsed().as_secs_f64(),
    };

    ReportAnalysis {
        sessions,
        averages,
        diagnostics,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
