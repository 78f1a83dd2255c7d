use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the grind-session monitor.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A filename did not carry the expected `DD-MM-YYYY HH-MM-SS` stamp.
    #[error("Malformed timestamp in filename: {0}")]
    MalformedTimestamp(String),

    /// The expected reports directory does not exist.
    #[error("Reports directory not found: {0}")]
    ReportsDirNotFound(PathBuf),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the tracker crates.
pub type Result<T> = std::result::Result<T, TrackerError>;
