//! Non-fatal warnings surfaced while processing a report batch.
//!
//! All four conditions are skip-and-continue: the offending file or field
//! is excluded and the rest of the batch is unaffected. They are returned
//! as values so callers decide how to present them; the emission sites
//! additionally log via `tracing`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One warning raised while selecting, decoding or ingesting reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// The same filename appeared more than once; only the first is kept.
    DuplicateFile { filename: String },
    /// The filename carried no parseable timestamp; the file is dropped
    /// because it cannot be ordered.
    MalformedTimestamp { filename: String },
    /// The file's payload was not valid JSON (or not a report shape).
    DecodeFailure { filename: String, reason: String },
    /// A decoded report had no drop data; it is listed as a session but
    /// contributes nothing to the running averages.
    MissingDrops {
        grindspot_id: String,
        grindspot_name: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateFile { filename } => {
                write!(f, "Duplicate filename detected: {}. Skipping.", filename)
            }
            Diagnostic::MalformedTimestamp { filename } => {
                write!(f, "Skipping file with invalid timestamp: {}", filename)
            }
            Diagnostic::DecodeFailure { filename, reason } => {
                write!(f, "Error parsing {}: {}", filename, reason)
            }
            Diagnostic::MissingDrops {
                grindspot_id,
                grindspot_name,
            } => {
                write!(
                    f,
                    "No drops data found for grindspot {} ({})",
                    grindspot_name, grindspot_id
                )
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
