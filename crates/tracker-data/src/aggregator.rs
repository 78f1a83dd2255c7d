//! The stateful aggregation core.
//!
//! Consumes [`TimestampedReport`]s one at a time, in the chronological
//! order the reader produced, and maintains two structures: the session
//! index (grindspot → tier → sessions) and the running drop totals
//! (grindspot → tier → item → quantity/hours). The report builder walks
//! both read-only afterwards.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use tracker_core::catalog::Catalog;
use tracker_core::classifier::LootScrollTier;
use tracker_core::diagnostics::Diagnostic;
use tracker_core::models::TimestampedReport;

// ── DropTotals ────────────────────────────────────────────────────────────────

/// Running totals for one tracked item within one grindspot/tier bucket.
///
/// `hours` accrues for every session with drop data, whether or not this
/// particular item dropped; the average is only divided out downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DropTotals {
    /// Total dropped quantity across all counted sessions.
    pub quantity: u64,
    /// Total session hours across all counted sessions.
    pub hours: f64,
}

// ── SessionAggregator ─────────────────────────────────────────────────────────

/// Per-tier session lists for one grindspot.
pub type TierSessions = BTreeMap<LootScrollTier, Vec<TimestampedReport>>;

/// Per-tier, per-item drop totals for one grindspot.
pub type TierDropStats = BTreeMap<LootScrollTier, HashMap<String, DropTotals>>;

/// Accumulates session and drop statistics across a report batch.
///
/// Incremental by design: each call to [`ingest`](Self::ingest) processes
/// exactly one report and leaves the store consistent, so callers may feed
/// reports as they arrive. Nothing is ever removed.
pub struct SessionAggregator<'a> {
    catalog: &'a Catalog,
    /// Grindspot keys in first-seen order; drives output iteration.
    grindspot_order: Vec<String>,
    sessions: HashMap<String, TierSessions>,
    drop_stats: HashMap<String, TierDropStats>,
}

impl<'a> SessionAggregator<'a> {
    /// Create an empty store over the given catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            grindspot_order: Vec::new(),
            sessions: HashMap::new(),
            drop_stats: HashMap::new(),
        }
    }

    /// Ingest one report.
    ///
    /// The report always lands in the session index. Drop totals are only
    /// touched when the report carries drop data: a session without it is
    /// reported via [`Diagnostic::MissingDrops`] and contributes nothing
    /// to the averages.
    pub fn ingest(&mut self, report: TimestampedReport) -> Option<Diagnostic> {
        let catalog = self.catalog;
        let grindspot_id = report.report.grindspot_key();
        let tier = LootScrollTier::classify(report.report.session.buffs.as_deref());

        let session_hours = report.report.session.duration_hours();
        let drops = report.report.session.drops.clone();

        if !self.sessions.contains_key(&grindspot_id) {
            self.grindspot_order.push(grindspot_id.clone());
        }
        self.sessions
            .entry(grindspot_id.clone())
            .or_default()
            .entry(tier)
            .or_default()
            .push(report);

        if drops.is_empty() {
            let grindspot_name = catalog.grindspot_name(&grindspot_id).to_string();
            warn!(
                "No drops data found for grindspot {} ({})",
                grindspot_name, grindspot_id
            );
            return Some(Diagnostic::MissingDrops {
                grindspot_id,
                grindspot_name,
            });
        }

        let bucket = self
            .drop_stats
            .entry(grindspot_id.clone())
            .or_default()
            .entry(tier)
            .or_default();

        // Every tracked item is counted, present in this report or not:
        // quantity picks up what dropped, hours accrue unconditionally.
        for item_id in catalog.important_drops(&grindspot_id) {
            let totals = bucket.entry(item_id.clone()).or_default();
            if let Some(quantity) = drops.get(item_id) {
                totals.quantity += quantity;
            }
            totals.hours += session_hours;
        }

        None
    }

    /// The catalog this store aggregates against.
    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Grindspot keys in the order they were first seen.
    pub fn grindspots(&self) -> impl Iterator<Item = &str> {
        self.grindspot_order.iter().map(String::as_str)
    }

    /// The session index for one grindspot, if it has been seen.
    pub fn sessions_for(&self, grindspot_id: &str) -> Option<&TierSessions> {
        self.sessions.get(grindspot_id)
    }

    /// The drop totals for one grindspot, if any of its sessions carried
    /// drop data.
    pub fn stats_for(&self, grindspot_id: &str) -> Option<&TierDropStats> {
        self.drop_stats.get(grindspot_id)
    }

    /// Total number of ingested sessions across all grindspots.
    pub fn session_count(&self) -> usize {
        self.sessions
            .values()
            .flat_map(|tiers| tiers.values())
            .map(Vec::len)
            .sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
