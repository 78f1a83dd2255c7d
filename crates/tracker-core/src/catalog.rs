//! The id→name catalog.
//!
//! A single JSON document supplies display names for grind spots and
//! items, plus the ordered list of "important" drops tracked per spot.
//! Lookups never fail: unknown ids resolve to sentinel labels so that
//! unrecognised reports still show up in the output.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Display label for a grindspot id the catalog does not know.
pub const UNKNOWN_GRINDSPOT_NAME: &str = "Unknown Grind Spot";

/// Display label for an item id the catalog does not know.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown";

/// Lookup tables loaded from the catalog document (`data.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Grindspot id → display name.
    #[serde(default)]
    pub grindspot_names: HashMap<String, String>,
    /// Item id → display name.
    #[serde(default)]
    pub item_names: HashMap<String, String>,
    /// Grindspot id → ordered item ids to track. The order here is the
    /// display order everywhere downstream.
    #[serde(default)]
    pub important_drops: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Load and parse the catalog document at `path`.
    ///
    /// This is the one fatal failure in the program: without the catalog
    /// there is nothing meaningful to report.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| TrackerError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Display name for a grindspot id, with the Unknown fallback.
    pub fn grindspot_name(&self, id: &str) -> &str {
        self.grindspot_names
            .get(id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_GRINDSPOT_NAME)
    }

    /// Display name for an item id, with the Unknown fallback.
    pub fn item_name(&self, id: &str) -> &str {
        self.item_names
            .get(id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_ITEM_NAME)
    }

    /// The ordered tracked-item list for a grindspot; empty when the
    /// catalog has no entry for it.
    pub fn important_drops(&self, grindspot_id: &str) -> &[String] {
        self.important_drops
            .get(grindspot_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
