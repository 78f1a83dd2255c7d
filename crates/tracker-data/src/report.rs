//! Read-only report views over the aggregation store.
//!
//! Two pure traversals produce owned, serialisable structures with a fixed
//! ordering contract: grindspots in first-seen order, tiers with unbuffed
//! first, sessions chronological, items in catalog order. The presentation
//! layer consumes these as-is.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use tracker_core::classifier::LootScrollTier;
use tracker_core::models::TimestampedReport;

use crate::aggregator::SessionAggregator;

// ── Session view ──────────────────────────────────────────────────────────────

/// One tracked item's quantity within a single session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropLine {
    pub item_id: String,
    pub item_name: String,
    pub quantity: u64,
}

/// One session, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub timestamp: NaiveDateTime,
    /// Tracked items that actually dropped, in catalog order.
    pub drops: Vec<DropLine>,
    pub duration_hours: f64,
}

/// All sessions of one grindspot under one buff tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySessions {
    pub tier: LootScrollTier,
    /// Ascending by timestamp.
    pub sessions: Vec<SessionSummary>,
}

/// Chronological session listing for one grindspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrindspotSessions {
    pub grindspot_id: String,
    pub grindspot_name: String,
    pub categories: Vec<CategorySessions>,
}

/// The full per-session view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub grindspots: Vec<GrindspotSessions>,
}

// ── Average view ──────────────────────────────────────────────────────────────

/// Per-hour average for one tracked item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAverage {
    pub item_id: String,
    pub item_name: String,
    /// `quantity / hours`, or exactly 0 when no hours were accumulated.
    pub per_hour: f64,
}

/// Averages for one grindspot under one buff tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAverages {
    pub tier: LootScrollTier,
    /// Hours accumulated by this tier's counted sessions.
    pub total_hours: f64,
    /// Every tracked item, in catalog order, dropped or not.
    pub items: Vec<ItemAverage>,
}

/// Per-hour averages for one grindspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrindspotAverages {
    pub grindspot_id: String,
    pub grindspot_name: String,
    pub categories: Vec<CategoryAverages>,
}

/// The full average view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageReport {
    pub grindspots: Vec<GrindspotAverages>,
}

// ── Builders ──────────────────────────────────────────────────────────────────

/// Build the chronological per-session view.
pub fn build_session_report(store: &SessionAggregator) -> SessionReport {
    let catalog = store.catalog();
    let mut grindspots = Vec::new();

    for grindspot_id in store.grindspots() {
        let Some(tiers) = store.sessions_for(grindspot_id) else {
            continue;
        };

        let categories = tiers
            .iter()
            .map(|(tier, sessions)| {
                let mut sessions: Vec<&TimestampedReport> = sessions.iter().collect();
                sessions.sort_by_key(|s| s.timestamp);

                let summaries = sessions
                    .into_iter()
                    .map(|session| SessionSummary {
                        timestamp: session.timestamp,
                        drops: catalog
                            .important_drops(grindspot_id)
                            .iter()
                            .filter_map(|item_id| {
                                session.report.session.drops.get(item_id).map(|&quantity| {
                                    DropLine {
                                        item_id: item_id.clone(),
                                        item_name: catalog.item_name(item_id).to_string(),
                                        quantity,
                                    }
                                })
                            })
                            .collect(),
                        duration_hours: session.report.session.duration_hours(),
                    })
                    .collect();

                CategorySessions {
                    tier: *tier,
                    sessions: summaries,
                }
            })
            .collect();

        grindspots.push(GrindspotSessions {
            grindspot_id: grindspot_id.to_string(),
            grindspot_name: catalog.grindspot_name(grindspot_id).to_string(),
            categories,
        });
    }

    SessionReport { grindspots }
}

/// Build the per-hour average view.
///
/// Grindspots whose sessions all lacked drop data have no statistics and
/// do not appear here (they still appear in the session view).
pub fn build_average_report(store: &SessionAggregator) -> AverageReport {
    let catalog = store.catalog();
    let mut grindspots = Vec::new();

    for grindspot_id in store.grindspots() {
        let Some(tiers) = store.stats_for(grindspot_id) else {
            continue;
        };

        let categories = tiers
            .iter()
            .map(|(tier, stats)| {
                // All items in a bucket share the same accumulated hours.
                let total_hours = stats.values().next().map(|t| t.hours).unwrap_or(0.0);

                let items = catalog
                    .important_drops(grindspot_id)
                    .iter()
                    .map(|item_id| {
                        let totals = stats.get(item_id).copied().unwrap_or_default();
                        let per_hour = if totals.hours > 0.0 {
                            totals.quantity as f64 / totals.hours
                        } else {
                            0.0
                        };
                        ItemAverage {
                            item_id: item_id.clone(),
                            item_name: catalog.item_name(item_id).to_string(),
                            per_hour,
                        }
                    })
                    .collect();

                CategoryAverages {
                    tier: *tier,
                    total_hours,
                    items,
                }
            })
            .collect();

        grindspots.push(GrindspotAverages {
            grindspot_id: grindspot_id.to_string(),
            grindspot_name: catalog.grindspot_name(grindspot_id).to_string(),
            categories,
        });
    }

    AverageReport { grindspots }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tracker_core::catalog::Catalog;
    use tracker_core::models::GrindReport;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn catalog() -> Catalog {
        serde_json::from_str(
            r#"{
                "grindspot_names": {"5": "Polly's Forest"},
                "item_names": {"100": "Memory Fragment", "101": "Caphras Stone"},
                "important_drops": {"5": ["100", "101"]}
            }"#,
        )
        .unwrap()
    }

    fn report(day: u32, hour: u32, body: &str) -> TimestampedReport {
        let decoded: GrindReport = serde_json::from_str(body).unwrap();
        TimestampedReport {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            filename: format!("{:02}-03-2024 {:02}-00-00.json", day, hour),
            report: decoded,
        }
    }

    fn populated_store(catalog: &Catalog) -> SessionAggregator<'_> {
        let mut agg = SessionAggregator::new(catalog);
        // Tier-1 session: tracked item "100" never drops, 2 hours.
        agg.ingest(report(
            23,
            10,
            r#"{"grindspot_id": "5", "newSession": {"buffs": [1], "drops": {"999": 1}, "hours": 2}}"#,
        ));
        // Unbuffed session: 10 of item "100", 3 hours.
        agg.ingest(report(
            24,
            9,
            r#"{"grindspot_id": "5", "newSession": {"drops": {"100": 10}, "hours": 3}}"#,
        ));
        agg
    }

    // ── build_session_report ──────────────────────────────────────────────────

    #[test]
    fn test_session_view_tier_ordering() {
        let catalog = catalog();
        let store = populated_store(&catalog);
        let view = build_session_report(&store);

        let categories = &view.grindspots[0].categories;
        assert_eq!(categories[0].tier, LootScrollTier::Unbuffed);
        assert_eq!(categories[1].tier, LootScrollTier::Level1);
    }

    #[test]
    fn test_session_view_sessions_chronological() {
        let catalog = catalog();
        let mut agg = SessionAggregator::new(&catalog);
        // Same tier, out-of-order ingestion.
        agg.ingest(report(
            24,
            9,
            r#"{"grindspot_id": "5", "newSession": {"drops": {"100": 1}, "hours": 1}}"#,
        ));
        agg.ingest(report(
            23,
            10,
            r#"{"grindspot_id": "5", "newSession": {"drops": {"100": 2}, "hours": 1}}"#,
        ));

        let view = build_session_report(&agg);
        let sessions = &view.grindspots[0].categories[0].sessions;
        assert!(sessions[0].timestamp < sessions[1].timestamp);
    }

    #[test]
    fn test_session_view_drop_lines_in_catalog_order() {
        let catalog = catalog();
        let mut agg = SessionAggregator::new(&catalog);
        agg.ingest(report(
            23,
            10,
            r#"{"grindspot_id": "5", "newSession": {"drops": {"101": 2, "100": 8}, "hours": 1}}"#,
        ));

        let view = build_session_report(&agg);
        let drops = &view.grindspots[0].categories[0].sessions[0].drops;
        assert_eq!(drops.len(), 2);
        assert_eq!(drops[0].item_id, "100");
        assert_eq!(drops[0].item_name, "Memory Fragment");
        assert_eq!(drops[1].item_id, "101");
    }

    #[test]
    fn test_session_view_omits_absent_items() {
        let catalog = catalog();
        let store = populated_store(&catalog);
        let view = build_session_report(&store);

        // The tier-1 session dropped nothing that is tracked.
        let level1 = &view.grindspots[0].categories[1];
        assert_eq!(level1.tier, LootScrollTier::Level1);
        assert!(level1.sessions[0].drops.is_empty());
    }

    #[test]
    fn test_session_view_duration() {
        let catalog = catalog();
        let mut agg = SessionAggregator::new(&catalog);
        agg.ingest(report(
            23,
            10,
            r#"{"grindspot_id": "5", "newSession": {"drops": {"100": 1}, "hours": 1, "minutes": 45}}"#,
        ));

        let view = build_session_report(&agg);
        let session = &view.grindspots[0].categories[0].sessions[0];
        assert!((session.duration_hours - 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_session_view_includes_sessions_without_drops() {
        let catalog = catalog();
        let mut agg = SessionAggregator::new(&catalog);
        agg.ingest(report(
            23,
            10,
            r#"{"grindspot_id": "5", "newSession": {"hours": 2}}"#,
        ));

        let view = build_session_report(&agg);
        assert_eq!(view.grindspots[0].categories[0].sessions.len(), 1);
        // But the average view has nothing for this grindspot.
        let averages = build_average_report(&agg);
        assert!(averages.grindspots.is_empty());
    }

    #[test]
    fn test_session_view_unknown_grindspot_label() {
        let catalog = catalog();
        let mut agg = SessionAggregator::new(&catalog);
        agg.ingest(report(
            23,
            10,
            r#"{"grindspot_id": "77", "newSession": {"drops": {"1": 1}, "hours": 1}}"#,
        ));

        let view = build_session_report(&agg);
        assert_eq!(view.grindspots[0].grindspot_name, "Unknown Grind Spot");
    }

    // ── build_average_report ──────────────────────────────────────────────────

    #[test]
    fn test_average_view_rates() {
        let catalog = catalog();
        let store = populated_store(&catalog);
        let view = build_average_report(&store);

        let categories = &view.grindspots[0].categories;

        // Unbuffed: 10 drops over 3 hours.
        let unbuffed = &categories[0];
        assert_eq!(unbuffed.tier, LootScrollTier::Unbuffed);
        assert!((unbuffed.total_hours - 3.0).abs() < 1e-9);
        assert!((unbuffed.items[0].per_hour - 10.0 / 3.0).abs() < 1e-9);

        // Level 1: nothing tracked dropped over 2 hours → exactly 0.
        let level1 = &categories[1];
        assert_eq!(level1.tier, LootScrollTier::Level1);
        assert!((level1.total_hours - 2.0).abs() < 1e-9);
        assert_eq!(level1.items[0].per_hour, 0.0);
    }

    #[test]
    fn test_average_view_zero_hours_is_zero_not_error() {
        let catalog = catalog();
        let mut agg = SessionAggregator::new(&catalog);
        // A session with drops but zero duration.
        agg.ingest(report(
            23,
            10,
            r#"{"grindspot_id": "5", "newSession": {"drops": {"100": 3}}}"#,
        ));

        let view = build_average_report(&agg);
        let items = &view.grindspots[0].categories[0].items;
        assert_eq!(items[0].per_hour, 0.0);
    }

    #[test]
    fn test_average_view_lists_every_tracked_item() {
        let catalog = catalog();
        let store = populated_store(&catalog);
        let view = build_average_report(&store);

        for category in &view.grindspots[0].categories {
            let ids: Vec<&str> = category.items.iter().map(|i| i.item_id.as_str()).collect();
            assert_eq!(ids, vec!["100", "101"]);
        }
    }

    #[test]
    fn test_average_view_empty_store() {
        let catalog = catalog();
        let agg = SessionAggregator::new(&catalog);
        assert!(build_average_report(&agg).grindspots.is_empty());
        assert!(build_session_report(&agg).grindspots.is_empty());
    }
}
