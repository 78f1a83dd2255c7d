//! Colored console rendering of the report views.
//!
//! Consumes the plain data structures the engine produced; nothing here
//! feeds back into aggregation. Tier headings keep the tracker's original
//! color scheme: white for unbuffed, blue for tier 1, yellow for tier 2.

use colored::{ColoredString, Colorize};

use tracker_core::classifier::LootScrollTier;
use tracker_core::diagnostics::Diagnostic;
use tracker_core::formatting::{format_hours, format_number, format_rate};
use tracker_data::analysis::ReportAnalysis;
use tracker_data::report::{AverageReport, SessionReport};

/// Timestamp layout for session headings, e.g. `23-03-2024 13:28:12`.
const SESSION_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

// ── Console output ────────────────────────────────────────────────────────────

/// Print the chronological per-session listing.
pub fn print_session_report(report: &SessionReport) {
    for grindspot in &report.grindspots {
        println!();
        println!(
            "{}",
            format!("[-- {} --]", grindspot.grindspot_name)
                .bright_red()
                .bold()
        );

        for category in &grindspot.categories {
            println!();
            println!("{}", tier_heading(category.tier));

            for session in &category.sessions {
                println!("  {}", session.timestamp.format(SESSION_TIME_FORMAT));
                for drop in &session.drops {
                    println!(
                        "    {:<28} {:>10}",
                        drop.item_name,
                        format_number(drop.quantity as f64, 0)
                    );
                }
                println!(
                    "  Session Duration: {}",
                    format_hours(session.duration_hours)
                );
                println!();
            }
        }
    }
}

/// Print the per-hour averages.
pub fn print_average_report(report: &AverageReport) {
    println!();
    println!("{}", "---> Detailed Averages <---".bright_red().bold());

    for grindspot in &report.grindspots {
        println!();
        println!("{}", grindspot.grindspot_name.bold());

        for (index, category) in grindspot.categories.iter().enumerate() {
            if index > 0 {
                println!();
            }
            println!(
                "{} [{}]",
                tier_heading(category.tier),
                format_hours(category.total_hours)
            );
            for item in &category.items {
                println!("  {}: {}", item.item_name, format_rate(item.per_hour));
            }
        }
    }
}

/// Print the batch's non-fatal warnings to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", format!("WARNING: {}", diagnostic).yellow().bold());
    }
}

/// Serialise the analysis for machine consumers.
///
/// `view` narrows the payload the same way it narrows console output.
pub fn print_json(analysis: &ReportAnalysis, view: &str) -> anyhow::Result<()> {
    let value = match view {
        "sessions" => serde_json::to_value(&analysis.sessions)?,
        "averages" => serde_json::to_value(&analysis.averages)?,
        _ => serde_json::json!({
            "sessions": analysis.sessions,
            "averages": analysis.averages,
            "diagnostics": analysis.diagnostics,
            "metadata": analysis.metadata,
        }),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn tier_heading(tier: LootScrollTier) -> ColoredString {
    match tier {
        LootScrollTier::Unbuffed => tier.label().bright_white().bold(),
        LootScrollTier::Level1 => tier.label().bright_blue().bold(),
        LootScrollTier::Level2 => tier.label().bright_yellow().bold(),
    }
}
