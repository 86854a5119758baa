//! Core types shared by the backend and future clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Easy,
    Intermediate,
    Hard,
    UltraHard,
}

impl Level {
    /// All levels, easiest first.
    pub const ALL: [Level; 4] = [
        Self::Easy,
        Self::Intermediate,
        Self::Hard,
        Self::UltraHard,
    ];

    /// Get the level name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Intermediate => "Intermediate",
            Self::Hard => "Hard",
            Self::UltraHard => "UltraHard",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Easy" => Some(Self::Easy),
            "Intermediate" => Some(Self::Intermediate),
            "Hard" => Some(Self::Hard),
            "UltraHard" => Some(Self::UltraHard),
            _ => None,
        }
    }
}

/// Kind of catalog a daily selection is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Vocabulary,
    PhrasalVerbs,
    GameQuestions,
}

impl ContentType {
    /// Table/key name as stored in daily_content rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::PhrasalVerbs => "phrasal_verbs",
            Self::GameQuestions => "game_questions",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "vocabulary" => Some(Self::Vocabulary),
            "phrasal_verbs" => Some(Self::PhrasalVerbs),
            "game_questions" => Some(Self::GameQuestions),
            _ => None,
        }
    }
}

/// A vocabulary catalog entry. Immutable from the client's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub id: Uuid,
    pub word: String,
    pub translation: String,
    pub example: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    pub level: Level,
    pub category: String,
}

/// A phrasal-verb catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhrasalVerb {
    pub id: Uuid,
    pub verb: String,
    pub meaning: String,
    pub example: String,
    pub level: Level,
    pub category: String,
}

/// A quiz question belonging to one mini-game's bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameQuestion {
    pub id: Uuid,
    pub game_type: String,
    pub question: String,
    pub correct_answer: String,
    /// Alternate accepted answers for free-text games (empty otherwise).
    #[serde(default)]
    pub accepted_answers: Vec<String>,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Lifetime progress counters for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    pub words_learned: i64,
    pub games_completed: i64,
    pub phrasal_verbs_learned: i64,
    pub current_streak: i64,
    pub total_study_days: i64,
    pub level_progress: i64,
}

/// Snapshot of a user's daily allowance for one counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLimits {
    pub learned_today: i64,
    pub daily_limit: i64,
    pub can_learn_more: bool,
    pub remaining: i64,
}

impl DailyLimits {
    /// Derive the allowance snapshot from a raw counter and a plan limit.
    pub fn compute(learned_today: i64, daily_limit: i64) -> Self {
        Self {
            learned_today,
            daily_limit,
            can_learn_more: learned_today < daily_limit,
            remaining: (daily_limit - learned_today).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn level_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_str(level.as_str()), Some(level));
        }
        assert_eq!(Level::from_str("easy"), None);
    }

    #[test]
    fn content_type_round_trip() {
        for ct in [
            ContentType::Vocabulary,
            ContentType::PhrasalVerbs,
            ContentType::GameQuestions,
        ] {
            assert_eq!(ContentType::from_str(ct.as_str()), Some(ct));
        }
    }

    #[test]
    fn limits_under_cap() {
        let limits = DailyLimits::compute(3, 5);
        assert!(limits.can_learn_more);
        assert_eq!(limits.remaining, 2);
    }

    #[test]
    fn limits_at_cap() {
        let limits = DailyLimits::compute(5, 5);
        assert!(!limits.can_learn_more);
        assert_eq!(limits.remaining, 0);
    }

    #[test]
    fn limits_never_negative_remaining() {
        // A plan downgrade can leave learned_today above the new limit.
        let limits = DailyLimits::compute(40, 5);
        assert!(!limits.can_learn_more);
        assert_eq!(limits.remaining, 0);
    }
}
