//! Learning actions: quota-gated learning, game completion, and the
//! best-effort progress/achievement bookkeeping behind them.
//!
//! Quota and level-access checks may block an action; stats and achievement
//! writes never do. A bookkeeping failure is logged and the learner still
//! gets their success response.

use chrono::{Duration, Utc};
use uuid::Uuid;

use learning_core::types::DailyLimits;
use learning_core::{newly_earned, Achievement, Level};

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::{UsageCounter, User};

/// Outcome of a learn attempt.
pub struct LearnOutcome {
    pub success: bool,
    pub remaining: i64,
    pub new_achievements: Vec<Achievement>,
}

/// Current allowance snapshot for one counter.
pub async fn daily_limits(
    db: &Database,
    user: &User,
    counter: UsageCounter,
) -> Result<DailyLimits> {
    let today = Utc::now().date_naive();
    let learned_today = db
        .get_daily_usage(user.id, today)
        .await?
        .map(|usage| counter.value_in(&usage))
        .unwrap_or(0);
    Ok(DailyLimits::compute(learned_today, user.plan().daily_limit()))
}

/// Mark a vocabulary word learned.
pub async fn learn_word(db: &Database, user: &User, word_id: Uuid) -> Result<LearnOutcome> {
    let word = db
        .get_vocabulary_word(word_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Word {word_id} not found")))?;
    let level = Level::from_str(&word.level)
        .ok_or_else(|| ApiError::Internal(format!("Unknown level: {}", word.level)))?;

    learn_item(db, user, level, UsageCounter::Words).await
}

/// Mark a phrasal verb learned.
pub async fn learn_phrasal_verb(db: &Database, user: &User, verb_id: Uuid) -> Result<LearnOutcome> {
    let verb = db
        .get_phrasal_verb(verb_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Phrasal verb {verb_id} not found")))?;
    let level = Level::from_str(&verb.level)
        .ok_or_else(|| ApiError::Internal(format!("Unknown level: {}", verb.level)))?;

    learn_item(db, user, level, UsageCounter::PhrasalVerbs).await
}

async fn learn_item(
    db: &Database,
    user: &User,
    level: Level,
    counter: UsageCounter,
) -> Result<LearnOutcome> {
    let plan = user.plan();
    if !plan.allows_level(level) {
        return Err(ApiError::PlanRequired(format!(
            "{} content requires a higher plan",
            level.as_str()
        )));
    }

    let limit = plan.daily_limit();
    let today = Utc::now().date_naive();
    let first_of_day = db.get_daily_usage(user.id, today).await?.is_none();

    // A write failure reads as "not incremented": the learner sees a plain
    // failure response, never a server error, and no counter moves.
    let incremented = limit > 0
        && match db.increment_usage(user.id, today, counter, Some(limit)).await {
            Ok(incremented) => incremented,
            Err(err) => {
                tracing::warn!(user_id = %user.id, error = %err, "failed to increment daily usage");
                false
            }
        };
    if !incremented {
        return Ok(LearnOutcome {
            success: false,
            remaining: 0,
            new_achievements: Vec::new(),
        });
    }

    let limits = match daily_limits(db, user, counter).await {
        Ok(limits) => limits,
        Err(err) => {
            tracing::warn!(user_id = %user.id, error = %err, "failed to re-read daily limits");
            DailyLimits::compute(limit, limit)
        }
    };

    if first_of_day {
        record_study_day(db, user.id).await;
    }

    // Lifetime counters and achievements are fire-and-forget.
    let stat_result = match counter {
        UsageCounter::Words => db.increment_words_learned(user.id).await,
        UsageCounter::PhrasalVerbs => db.increment_phrasal_verbs_learned(user.id).await,
        UsageCounter::Games => db.increment_games_completed(user.id).await,
    };
    if let Err(err) = stat_result {
        tracing::warn!(user_id = %user.id, error = %err, "failed to update lifetime stats");
    }
    let new_achievements = check_achievements(db, user.id).await;

    Ok(LearnOutcome {
        success: true,
        remaining: limits.remaining,
        new_achievements,
    })
}

/// Record a finished game session.
pub async fn complete_game(db: &Database, user: &User) -> Result<Vec<Achievement>> {
    let today = Utc::now().date_naive();
    let first_of_day = db.get_daily_usage(user.id, today).await?.is_none();

    // Games are not quota-gated; the counter feeds stats only.
    if let Err(err) = db
        .increment_usage(user.id, today, UsageCounter::Games, None)
        .await
    {
        tracing::warn!(user_id = %user.id, error = %err, "failed to count game play");
    } else if first_of_day {
        record_study_day(db, user.id).await;
    }

    if let Err(err) = db.increment_games_completed(user.id).await {
        tracing::warn!(user_id = %user.id, error = %err, "failed to update lifetime stats");
    }

    Ok(check_achievements(db, user.id).await)
}

/// Lifetime stats snapshot; a missing row reads as all zeroes.
pub async fn user_stats(db: &Database, user_id: Uuid) -> Result<learning_core::UserStats> {
    Ok(db
        .get_user_stats(user_id)
        .await?
        .map(|row| row.to_core_stats())
        .unwrap_or_default())
}

/// Award every achievement the user's current stats newly qualify for.
/// Best-effort: failures are logged and yield an empty list.
pub async fn check_achievements(db: &Database, user_id: Uuid) -> Vec<Achievement> {
    match try_check_achievements(db, user_id).await {
        Ok(awarded) => awarded,
        Err(err) => {
            tracing::warn!(%user_id, error = %err, "achievement check failed");
            Vec::new()
        }
    }
}

async fn try_check_achievements(db: &Database, user_id: Uuid) -> Result<Vec<Achievement>> {
    let stats = user_stats(db, user_id).await?;

    let mut catalog = Vec::new();
    for row in db.get_achievements().await? {
        catalog.push(row.to_core_achievement()?);
    }

    let earned: std::collections::HashSet<Uuid> = db
        .get_user_achievements(user_id)
        .await?
        .into_iter()
        .map(|ua| ua.achievement_id)
        .collect();

    let mut awarded = Vec::new();
    for achievement in newly_earned(&catalog, &earned, &stats) {
        // Idempotent insert: a concurrent award of the same pair is fine.
        if db.award_achievement(user_id, achievement.id).await? {
            awarded.push(achievement.clone());
        }
    }

    Ok(awarded)
}

async fn record_study_day(db: &Database, user_id: Uuid) {
    let result = async {
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let continues_streak = db.get_daily_usage(user_id, yesterday).await?.is_some();
        db.record_study_day(user_id, continues_streak).await
    }
    .await;

    if let Err(err) = result {
        tracing::warn!(%user_id, error = %err, "failed to record study day");
    }
}
