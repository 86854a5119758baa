//! Subscription plans and the tables they gate.
//!
//! Plans form a strict hierarchy: each tier can see every level the tier
//! below it can, plus one more, and gets a larger daily allowance. An
//! unrecognized plan string always resolves to Free.

use serde::{Deserialize, Serialize};

use crate::types::Level;

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Free,
    Basic,
    Medium,
    Pro,
}

impl Default for Plan {
    fn default() -> Self {
        Self::Free
    }
}

impl Plan {
    /// Get the plan name as stored on the user profile.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Medium => "medium",
            Self::Pro => "pro",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free" => Some(Self::Free),
            "basic" => Some(Self::Basic),
            "medium" => Some(Self::Medium),
            "pro" => Some(Self::Pro),
            _ => None,
        }
    }

    /// Resolve a profile value, failing closed on anything unrecognized.
    pub fn from_profile(s: Option<&str>) -> Self {
        s.and_then(Self::from_str).unwrap_or(Self::Free)
    }

    /// Items a user on this plan may mark learned per counter per day.
    pub fn daily_limit(&self) -> i64 {
        match self {
            Self::Free => 5,
            Self::Basic => 20,
            Self::Medium => 40,
            Self::Pro => 70,
        }
    }

    /// Difficulty levels unlocked by this plan, cumulative with the tiers
    /// below it.
    pub fn accessible_levels(&self) -> &'static [Level] {
        match self {
            Self::Free => &[Level::Easy],
            Self::Basic => &[Level::Easy, Level::Intermediate],
            Self::Medium => &[Level::Easy, Level::Intermediate, Level::Hard],
            Self::Pro => &[
                Level::Easy,
                Level::Intermediate,
                Level::Hard,
                Level::UltraHard,
            ],
        }
    }

    /// Whether content at `level` is unlocked for this plan.
    pub fn allows_level(&self, level: Level) -> bool {
        self.accessible_levels().contains(&level)
    }
}
