//! Database models and API types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from learning-core
pub use learning_core::achievements::{Achievement, RequirementKind};
pub use learning_core::types::{
    ContentType, DailyLimits, GameQuestion, Level, PhrasalVerb, UserStats, VocabularyWord,
};
pub use learning_core::{CoreError, GameKind, Plan};

// === Database Entity Types ===

/// Registered user with bearer credential and subscription plan
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub premium_plan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl User {
    /// Resolve the stored plan string, failing closed to Free.
    pub fn plan(&self) -> Plan {
        Plan::from_profile(self.premium_plan.as_deref())
    }
}

/// Vocabulary catalog row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVocabularyWord {
    pub id: Uuid,
    pub word: String,
    pub translation: String,
    pub example: String,
    pub pronunciation: Option<String>,
    pub level: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl DbVocabularyWord {
    /// Convert to the shared API type
    pub fn to_api_word(&self) -> learning_core::Result<VocabularyWord> {
        Ok(VocabularyWord {
            id: self.id,
            word: self.word.clone(),
            translation: self.translation.clone(),
            example: self.example.clone(),
            pronunciation: self.pronunciation.clone(),
            level: Level::from_str(&self.level)
                .ok_or_else(|| CoreError::UnknownLevel(self.level.clone()))?,
            category: self.category.clone(),
        })
    }
}

/// Phrasal-verb catalog row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPhrasalVerb {
    pub id: Uuid,
    pub verb: String,
    pub meaning: String,
    pub example: String,
    pub level: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl DbPhrasalVerb {
    /// Convert to the shared API type
    pub fn to_api_verb(&self) -> learning_core::Result<PhrasalVerb> {
        Ok(PhrasalVerb {
            id: self.id,
            verb: self.verb.clone(),
            meaning: self.meaning.clone(),
            example: self.example.clone(),
            level: Level::from_str(&self.level)
                .ok_or_else(|| CoreError::UnknownLevel(self.level.clone()))?,
            category: self.category.clone(),
        })
    }
}

/// Game-question catalog row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGameQuestion {
    pub id: Uuid,
    pub game_type: String,
    pub question: String,
    pub correct_answer: String,
    pub accepted_answers: Vec<String>,
    pub options: Vec<String>,
    pub hint: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbGameQuestion {
    /// Convert to the shared API type
    pub fn to_api_question(&self) -> GameQuestion {
        GameQuestion {
            id: self.id,
            game_type: self.game_type.clone(),
            question: self.question.clone(),
            correct_answer: self.correct_answer.clone(),
            accepted_answers: self.accepted_answers.clone(),
            options: self.options.clone(),
            hint: self.hint.clone(),
        }
    }
}

/// Persisted daily selection (one per user/day/catalog key)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDailySelection {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_date: NaiveDate,
    pub content_type: String,
    pub level: Option<String>,
    pub game_type: Option<String>,
    pub content_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Per-day usage counters
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDailyUsage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub words_learned_today: i64,
    pub phrasal_verbs_learned_today: i64,
    pub games_played_today: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifetime stats row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUserStats {
    pub user_id: Uuid,
    pub words_learned: i64,
    pub games_completed: i64,
    pub phrasal_verbs_learned: i64,
    pub current_streak: i64,
    pub total_study_days: i64,
    pub level_progress: i64,
    pub updated_at: DateTime<Utc>,
}

impl DbUserStats {
    /// Convert to the shared stats type
    pub fn to_core_stats(&self) -> UserStats {
        UserStats {
            words_learned: self.words_learned,
            games_completed: self.games_completed,
            phrasal_verbs_learned: self.phrasal_verbs_learned,
            current_streak: self.current_streak,
            total_study_days: self.total_study_days,
            level_progress: self.level_progress,
        }
    }
}

/// Achievement catalog row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAchievement {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub requirement_type: String,
    pub requirement_value: i64,
    pub created_at: DateTime<Utc>,
}

impl DbAchievement {
    /// Convert to the shared catalog type
    pub fn to_core_achievement(&self) -> learning_core::Result<Achievement> {
        Ok(Achievement {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            requirement_kind: RequirementKind::from_str(&self.requirement_type)
                .ok_or_else(|| CoreError::UnknownRequirement(self.requirement_type.clone()))?,
            requirement_value: self.requirement_value,
        })
    }
}

/// Earned achievement row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUserAchievement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub achievement_id: Uuid,
    pub earned_at: DateTime<Utc>,
}

/// Which daily counter an increment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageCounter {
    Words,
    PhrasalVerbs,
    Games,
}

impl UsageCounter {
    /// Counter name used in the limits API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Words => "words",
            Self::PhrasalVerbs => "phrasal_verbs",
            Self::Games => "games",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "words" => Some(Self::Words),
            "phrasal_verbs" => Some(Self::PhrasalVerbs),
            "games" => Some(Self::Games),
            _ => None,
        }
    }

    /// Read this counter out of a usage row.
    pub fn value_in(&self, usage: &DbDailyUsage) -> i64 {
        match self {
            Self::Words => usage.words_learned_today,
            Self::PhrasalVerbs => usage.phrasal_verbs_learned_today,
            Self::Games => usage.games_played_today,
        }
    }
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub email: String,
    pub plan: Plan,
}

// Content types
#[derive(Debug, Serialize, Deserialize)]
pub struct LevelQuery {
    pub level: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameTypeQuery {
    pub game_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyVocabularyResponse {
    pub words: Vec<VocabularyWord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyPhrasalVerbsResponse {
    pub verbs: Vec<PhrasalVerb>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyGameQuestionsResponse {
    pub questions: Vec<GameQuestion>,
}

// Limits types
#[derive(Debug, Serialize, Deserialize)]
pub struct LimitsQuery {
    pub counter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyLimitsResponse {
    pub plan: Plan,
    pub counter: String,
    #[serde(flatten)]
    pub limits: DailyLimits,
}

// Learn/game types
#[derive(Debug, Serialize, Deserialize)]
pub struct LearnWordRequest {
    pub word_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnPhrasalVerbRequest {
    pub verb_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnResponse {
    pub success: bool,
    pub remaining: i64,
    pub new_achievements: Vec<Achievement>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteGameRequest {
    pub game_type: String,
    pub score: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteGameResponse {
    pub success: bool,
    pub new_achievements: Vec<Achievement>,
}

// Achievements types
#[derive(Debug, Serialize, Deserialize)]
pub struct EarnedAchievement {
    pub achievement: Achievement,
    pub earned_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AchievementsResponse {
    pub user_achievements: Vec<EarnedAchievement>,
    pub all_achievements: Vec<Achievement>,
}
