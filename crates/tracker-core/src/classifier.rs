//! Loot-scroll tier classification.
//!
//! Resolves the polymorphic `buffs` field of a report into a single tier,
//! exactly once at ingestion time. Unrecognised shapes are not errors:
//! they classify as unbuffed, matching what the tracker itself assumes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::BuffEntry;

// ── LootScrollTier ────────────────────────────────────────────────────────────

/// The loot-scroll buff tier a session was played under.
///
/// The derived `Ord` puts `Unbuffed` first, then the buffed tiers in
/// ascending order; category sections display in this order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum LootScrollTier {
    /// No loot scroll active, or the buff field was absent/unrecognised.
    #[default]
    Unbuffed,
    Level1,
    Level2,
}

impl LootScrollTier {
    /// Resolve a tier from a report's decoded `buffs` field.
    ///
    /// Resolution order:
    /// 1. Missing or empty buff list → `Unbuffed`.
    /// 2. First element is a nested group → its first integer value,
    ///    accepted only when it is 1 or 2.
    /// 3. First element is a bare code → same 1-or-2 rule.
    /// 4. Any other shape → `Unbuffed`, silently.
    pub fn classify(buffs: Option<&[BuffEntry]>) -> Self {
        match buffs.and_then(|entries| entries.first()) {
            Some(BuffEntry::Code(code)) => Self::from_code(*code),
            Some(BuffEntry::Group(group)) => group
                .first()
                .and_then(|value| value.as_i64())
                .map(Self::from_code)
                .unwrap_or(Self::Unbuffed),
            _ => Self::Unbuffed,
        }
    }

    /// Map a raw tier code to a tier. Codes other than 1 and 2 mean unbuffed.
    fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Level1,
            2 => Self::Level2,
            _ => Self::Unbuffed,
        }
    }

    /// Numeric tier level: 0, 1 or 2.
    pub fn level(self) -> u8 {
        match self {
            Self::Unbuffed => 0,
            Self::Level1 => 1,
            Self::Level2 => 2,
        }
    }

    /// The category label used throughout the reports, e.g. `"LVL1 LS"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unbuffed => "LVL0 LS",
            Self::Level1 => "LVL1 LS",
            Self::Level2 => "LVL2 LS",
        }
    }
}

impl fmt::Display for LootScrollTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
