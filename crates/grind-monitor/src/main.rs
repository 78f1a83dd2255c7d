mod bootstrap;
mod render;

use anyhow::{Context, Result};
use clap::Parser;

use tracker_core::catalog::Catalog;
use tracker_core::settings::Settings;
use tracker_data::analysis::analyze_reports;

fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Grind Monitor v{} starting", env!("CARGO_PKG_VERSION"));

    let catalog = Catalog::load(&settings.catalog)
        .with_context(|| format!("loading catalog {}", settings.catalog.display()))?;

    bootstrap::check_reports_dir(&settings.reports_dir)?;

    let analysis = analyze_reports(&settings.reports_dir, &catalog);

    tracing::info!(
        "Processed {} of {} report files in {:.3}s",
        analysis.metadata.files_ingested,
        analysis.metadata.files_discovered,
        analysis.metadata.load_time_seconds
    );

    if settings.format == "json" {
        render::print_json(&analysis, &settings.view)?;
        return Ok(());
    }

    render::print_diagnostics(&analysis.diagnostics);

    if matches!(settings.view.as_str(), "sessions" | "all") {
        render::print_session_report(&analysis.sessions);
    }
    if matches!(settings.view.as_str(), "averages" | "all") {
        render::print_average_report(&analysis.averages);
    }

    Ok(())
}
