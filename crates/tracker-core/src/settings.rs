use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Grind-session yield reports from tracker output files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "grind-monitor",
    about = "Per-session listings and per-hour drop averages from grind reports",
    version
)]
pub struct Settings {
    /// Directory containing the timestamped report files
    #[arg(long, default_value = "grindreports")]
    pub reports_dir: PathBuf,

    /// Path to the catalog document (id→name maps and tracked drops)
    #[arg(long, default_value = "data.json")]
    pub catalog: PathBuf,

    /// Which report to show
    #[arg(long, default_value = "all", value_parser = ["sessions", "averages", "all"])]
    pub view: String,

    /// Output format
    #[arg(long, default_value = "console", value_parser = ["console", "json"])]
    pub format: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
