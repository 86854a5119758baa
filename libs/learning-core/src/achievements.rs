//! Achievement catalog evaluation.
//!
//! The catalog itself lives in the database (seeded by migration); this
//! module only decides which entries a user's lifetime counters newly
//! qualify for. Awarding is the caller's insert-if-absent.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserStats;

/// Which lifetime counter an achievement watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    WordsLearned,
    GamesCompleted,
    CurrentStreak,
    TotalStudyDays,
    PhrasalVerbsLearned,
}

impl RequirementKind {
    /// Get the requirement identifier as stored in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WordsLearned => "words_learned",
            Self::GamesCompleted => "games_completed",
            Self::CurrentStreak => "current_streak",
            Self::TotalStudyDays => "total_study_days",
            Self::PhrasalVerbsLearned => "phrasal_verbs_learned",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "words_learned" => Some(Self::WordsLearned),
            "games_completed" => Some(Self::GamesCompleted),
            "current_streak" => Some(Self::CurrentStreak),
            "total_study_days" => Some(Self::TotalStudyDays),
            "phrasal_verbs_learned" => Some(Self::PhrasalVerbsLearned),
            _ => None,
        }
    }

    /// The stat value this requirement is compared against.
    pub fn current_value(&self, stats: &UserStats) -> i64 {
        match self {
            Self::WordsLearned => stats.words_learned,
            Self::GamesCompleted => stats.games_completed,
            Self::CurrentStreak => stats.current_streak,
            Self::TotalStudyDays => stats.total_study_days,
            Self::PhrasalVerbsLearned => stats.phrasal_verbs_learned,
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub requirement_kind: RequirementKind,
    pub requirement_value: i64,
}

impl Achievement {
    /// Whether `stats` satisfies this achievement's threshold.
    pub fn qualifies(&self, stats: &UserStats) -> bool {
        self.requirement_kind.current_value(stats) >= self.requirement_value
    }
}

/// Catalog entries the user now qualifies for but has not yet earned.
/// Order follows the catalog.
pub fn newly_earned<'a>(
    catalog: &'a [Achievement],
    earned: &HashSet<Uuid>,
    stats: &UserStats,
) -> Vec<&'a Achievement> {
    catalog
        .iter()
        .filter(|a| !earned.contains(&a.id) && a.qualifies(stats))
        .collect()
}
