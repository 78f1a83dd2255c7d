use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sentinel key used when a report carries no `grindspot_id` at all.
///
/// Such reports still participate in every view; the catalog resolves the
/// key to its "Unknown Grind Spot" display name.
pub const UNKNOWN_GRINDSPOT_ID: &str = "unknown";

// ── GrindspotId ───────────────────────────────────────────────────────────────

/// The grind spot identifier as it appears on the wire.
///
/// The tracker writes it inconsistently: sometimes a JSON string, sometimes
/// a bare number. Both resolve to the same string key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GrindspotId {
    Text(String),
    Number(i64),
}

impl GrindspotId {
    /// Canonical string key: trimmed text, or the number's decimal form.
    pub fn as_key(&self) -> String {
        match self {
            GrindspotId::Text(s) => s.trim().to_string(),
            GrindspotId::Number(n) => n.to_string(),
        }
    }
}

// ── BuffEntry ─────────────────────────────────────────────────────────────────

/// One element of a report's `buffs` array.
///
/// The tracker encodes the loot-scroll tier either as a bare code
/// (`[1, ...]`) or as a one-level nested group (`[[2, 8], ...]`). Every
/// other shape is preserved verbatim and carries no tier information.
/// The classifier resolves this exactly once at ingestion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuffEntry {
    /// Bare tier code.
    Code(i64),
    /// Nested buff group; the first value is the tier code.
    Group(Vec<serde_json::Value>),
    /// Anything else the tracker may emit.
    Other(serde_json::Value),
}

// ── SessionData ───────────────────────────────────────────────────────────────

/// The `newSession` payload of a grind report.
///
/// Every field is optional on the wire; absent fields default so that a
/// sparse report still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Active buffs at session start, tier encoding in the first element.
    #[serde(default)]
    pub buffs: Option<Vec<BuffEntry>>,
    /// Item id → dropped quantity. Empty means "no drop data recorded".
    #[serde(default)]
    pub drops: BTreeMap<String, u64>,
    /// Whole hours played.
    #[serde(default)]
    pub hours: f64,
    /// Additional minutes played.
    #[serde(default)]
    pub minutes: f64,
}

impl SessionData {
    /// Session duration in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        self.hours + self.minutes / 60.0
    }
}

// ── GrindReport ───────────────────────────────────────────────────────────────

/// A single decoded session-report file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrindReport {
    /// Where the session took place.
    #[serde(default)]
    pub grindspot_id: Option<GrindspotId>,
    /// The session body, nested under `newSession` on the wire.
    #[serde(default, rename = "newSession")]
    pub session: SessionData,
}

impl GrindReport {
    /// Resolve the grindspot key this report aggregates under.
    ///
    /// A missing id falls back to [`UNKNOWN_GRINDSPOT_ID`] rather than
    /// dropping the report.
    pub fn grindspot_key(&self) -> String {
        self.grindspot_id
            .as_ref()
            .map(GrindspotId::as_key)
            .unwrap_or_else(|| UNKNOWN_GRINDSPOT_ID.to_string())
    }
}

// ── TimestampedReport ─────────────────────────────────────────────────────────

/// A decoded report joined with the timestamp recovered from its filename.
///
/// Immutable once created; the aggregation store appends these in
/// chronological order and never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedReport {
    /// Wall-clock session stamp parsed from the filename.
    pub timestamp: NaiveDateTime,
    /// Source filename, kept for diagnostics and deterministic tie-breaks.
    pub filename: String,
    /// The decoded payload.
    pub report: GrindReport,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── GrindspotId ───────────────────────────────────────────────────────────

    #[test]
    fn test_grindspot_id_text_trims_whitespace() {
        let id = GrindspotId::Text("  5 ".to_string());
        assert_eq!(id.as_key(), "5");
    }

    #[test]
    fn test_grindspot_id_number_coerces_to_string() {
        let id = GrindspotId::Number(42);
        assert_eq!(id.as_key(), "42");
    }

    #[test]
    fn test_grindspot_id_deserializes_from_string_or_number() {
        let from_str: GrindspotId = serde_json::from_str(r#""12""#).unwrap();
        let from_num: GrindspotId = serde_json::from_str("12").unwrap();
        assert_eq!(from_str.as_key(), "12");
        assert_eq!(from_num.as_key(), "12");
    }

    // ── BuffEntry ─────────────────────────────────────────────────────────────

    #[test]
    fn test_buff_entry_bare_code() {
        let entry: BuffEntry = serde_json::from_str("2").unwrap();
        assert_eq!(entry, BuffEntry::Code(2));
    }

    #[test]
    fn test_buff_entry_nested_group() {
        let entry: BuffEntry = serde_json::from_str("[1, 8]").unwrap();
        match entry {
            BuffEntry::Group(values) => {
                assert_eq!(values[0].as_i64(), Some(1));
                assert_eq!(values.len(), 2);
            }
            other => panic!("expected Group, got {:?}", other),
        }
    }

    #[test]
    fn test_buff_entry_unrecognised_shape() {
        let entry: BuffEntry = serde_json::from_str(r#""frenzy""#).unwrap();
        assert!(matches!(entry, BuffEntry::Other(_)));
    }

    // ── SessionData ───────────────────────────────────────────────────────────

    #[test]
    fn test_session_duration_hours_and_minutes() {
        let session = SessionData {
            hours: 2.0,
            minutes: 30.0,
            ..Default::default()
        };
        assert!((session.duration_hours() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_session_duration_zero() {
        let session = SessionData::default();
        assert_eq!(session.duration_hours(), 0.0);
    }

    #[test]
    fn test_session_data_defaults_for_sparse_payload() {
        let session: SessionData = serde_json::from_str("{}").unwrap();
        assert!(session.buffs.is_none());
        assert!(session.drops.is_empty());
        assert_eq!(session.hours, 0.0);
        assert_eq!(session.minutes, 0.0);
    }

    // ── GrindReport ───────────────────────────────────────────────────────────

    #[test]
    fn test_grind_report_full_wire_shape() {
        let json = r#"{
            "grindspot_id": "5",
            "newSession": {
                "buffs": [[1, 9]],
                "drops": {"100": 10, "101": 3},
                "hours": 1,
                "minutes": 45
            }
        }"#;
        let report: GrindReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.grindspot_key(), "5");
        assert_eq!(report.session.drops.get("100"), Some(&10));
        assert!((report.session.duration_hours() - 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_grind_report_missing_id_uses_sentinel() {
        let report: GrindReport = serde_json::from_str("{}").unwrap();
        assert_eq!(report.grindspot_key(), UNKNOWN_GRINDSPOT_ID);
    }

    #[test]
    fn test_grind_report_numeric_id() {
        let report: GrindReport = serde_json::from_str(r#"{"grindspot_id": 7}"#).unwrap();
        assert_eq!(report.grindspot_key(), "7");
    }

    #[test]
    fn test_grind_report_missing_session_defaults() {
        let report: GrindReport = serde_json::from_str(r#"{"grindspot_id": "5"}"#).unwrap();
        assert!(report.session.drops.is_empty());
        assert_eq!(report.session.duration_hours(), 0.0);
    }
}
