//! PostgreSQL database operations

use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with generated token and a zeroed stats row
    pub async fn create_user(&self, email: &str) -> Result<User> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, token)
            VALUES ($1, $2)
            RETURNING id, email, token, premium_plan, created_at, last_seen_at
            "#,
        )
        .bind(email)
        .bind(&token)
        .fetch_one(&self.pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO user_stats (user_id)
            VALUES ($1)
            "#,
        )
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, token, premium_plan, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Set a user's plan (test/admin hook; billing owns this in production)
    pub async fn set_user_plan(&self, user_id: Uuid, plan: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET premium_plan = $2
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(plan)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Vocabulary Repository ===

    /// Get vocabulary words, optionally filtered by level
    pub async fn get_vocabulary(&self, level: Option<&str>) -> Result<Vec<DbVocabularyWord>> {
        let words = match level {
            Some(level) => {
                sqlx::query_as::<_, DbVocabularyWord>(
                    r#"
                    SELECT id, word, translation, example, pronunciation, level, category, created_at
                    FROM vocabulary
                    WHERE level = $1
                    ORDER BY id
                    "#,
                )
                .bind(level)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DbVocabularyWord>(
                    r#"
                    SELECT id, word, translation, example, pronunciation, level, category, created_at
                    FROM vocabulary
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(words)
    }

    /// Get one vocabulary word by id
    pub async fn get_vocabulary_word(&self, id: Uuid) -> Result<Option<DbVocabularyWord>> {
        let word = sqlx::query_as::<_, DbVocabularyWord>(
            r#"
            SELECT id, word, translation, example, pronunciation, level, category, created_at
            FROM vocabulary
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(word)
    }

    /// Get vocabulary words by ids (order not guaranteed; callers reorder)
    pub async fn get_vocabulary_by_ids(&self, ids: &[Uuid]) -> Result<Vec<DbVocabularyWord>> {
        let words = sqlx::query_as::<_, DbVocabularyWord>(
            r#"
            SELECT id, word, translation, example, pronunciation, level, category, created_at
            FROM vocabulary
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    // === Phrasal Verb Repository ===

    /// Get phrasal verbs, optionally filtered by level
    pub async fn get_phrasal_verbs(&self, level: Option<&str>) -> Result<Vec<DbPhrasalVerb>> {
        let verbs = match level {
            Some(level) => {
                sqlx::query_as::<_, DbPhrasalVerb>(
                    r#"
                    SELECT id, verb, meaning, example, level, category, created_at
                    FROM phrasal_verbs
                    WHERE level = $1
                    ORDER BY id
                    "#,
                )
                .bind(level)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DbPhrasalVerb>(
                    r#"
                    SELECT id, verb, meaning, example, level, category, created_at
                    FROM phrasal_verbs
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(verbs)
    }

    /// Get one phrasal verb by id
    pub async fn get_phrasal_verb(&self, id: Uuid) -> Result<Option<DbPhrasalVerb>> {
        let verb = sqlx::query_as::<_, DbPhrasalVerb>(
            r#"
            SELECT id, verb, meaning, example, level, category, created_at
            FROM phrasal_verbs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(verb)
    }

    /// Get phrasal verbs by ids (order not guaranteed; callers reorder)
    pub async fn get_phrasal_verbs_by_ids(&self, ids: &[Uuid]) -> Result<Vec<DbPhrasalVerb>> {
        let verbs = sqlx::query_as::<_, DbPhrasalVerb>(
            r#"
            SELECT id, verb, meaning, example, level, category, created_at
            FROM phrasal_verbs
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(verbs)
    }

    // === Game Question Repository ===

    /// Get the question bank for one game
    pub async fn get_game_questions(&self, game_type: &str) -> Result<Vec<DbGameQuestion>> {
        let questions = sqlx::query_as::<_, DbGameQuestion>(
            r#"
            SELECT id, game_type, question, correct_answer, accepted_answers,
                   options, hint, created_at
            FROM game_questions
            WHERE game_type = $1
            ORDER BY id
            "#,
        )
        .bind(game_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    /// Get game questions by ids (order not guaranteed; callers reorder)
    pub async fn get_game_questions_by_ids(&self, ids: &[Uuid]) -> Result<Vec<DbGameQuestion>> {
        let questions = sqlx::query_as::<_, DbGameQuestion>(
            r#"
            SELECT id, game_type, question, correct_answer, accepted_answers,
                   options, hint, created_at
            FROM game_questions
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    // === Daily Selection Repository ===

    /// Look up the persisted selection for one user/day/catalog key
    pub async fn get_daily_selection(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        content_type: &str,
        level: Option<&str>,
        game_type: Option<&str>,
    ) -> Result<Option<DbDailySelection>> {
        let selection = sqlx::query_as::<_, DbDailySelection>(
            r#"
            SELECT id, user_id, content_date, content_type, level, game_type,
                   content_ids, created_at
            FROM daily_content
            WHERE user_id = $1 AND content_date = $2 AND content_type = $3
              AND level IS NOT DISTINCT FROM $4
              AND game_type IS NOT DISTINCT FROM $5
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(content_type)
        .bind(level)
        .bind(game_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(selection)
    }

    /// Persist a day's selection. First writer wins; a concurrent duplicate
    /// is a no-op and the stored row stays authoritative.
    pub async fn insert_daily_selection(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        content_type: &str,
        level: Option<&str>,
        game_type: Option<&str>,
        content_ids: &[Uuid],
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO daily_content (user_id, content_date, content_type, level, game_type, content_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, content_date, content_type, level, game_type) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(content_type)
        .bind(level)
        .bind(game_type)
        .bind(content_ids)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Daily Usage Repository ===

    /// Get the usage row for one user and day
    pub async fn get_daily_usage(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DbDailyUsage>> {
        let usage = sqlx::query_as::<_, DbDailyUsage>(
            r#"
            SELECT id, user_id, date, words_learned_today, phrasal_verbs_learned_today,
                   games_played_today, created_at, updated_at
            FROM daily_usage
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(usage)
    }

    /// Atomically add one to a daily counter, refusing past the ceiling.
    ///
    /// Returns false when the ceiling was already reached; the row is left
    /// untouched in that case. A missing row is created at 1 (the ceiling
    /// only permits that when it is at least 1; callers reject zero-limit
    /// plans before getting here).
    pub async fn increment_usage(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        counter: UsageCounter,
        ceiling: Option<i64>,
    ) -> Result<bool> {
        // The ceiling comparison and the add happen in one statement, so
        // concurrent sessions cannot push the counter past the limit.
        let query = match (counter, ceiling.is_some()) {
            (UsageCounter::Words, true) => {
                r#"
                INSERT INTO daily_usage (user_id, date, words_learned_today)
                VALUES ($1, $2, 1)
                ON CONFLICT (user_id, date) DO UPDATE
                SET words_learned_today = daily_usage.words_learned_today + 1,
                    updated_at = NOW()
                WHERE daily_usage.words_learned_today < $3
                "#
            }
            (UsageCounter::Words, false) => {
                r#"
                INSERT INTO daily_usage (user_id, date, words_learned_today)
                VALUES ($1, $2, 1)
                ON CONFLICT (user_id, date) DO UPDATE
                SET words_learned_today = daily_usage.words_learned_today + 1,
                    updated_at = NOW()
                "#
            }
            (UsageCounter::PhrasalVerbs, true) => {
                r#"
                INSERT INTO daily_usage (user_id, date, phrasal_verbs_learned_today)
                VALUES ($1, $2, 1)
                ON CONFLICT (user_id, date) DO UPDATE
                SET phrasal_verbs_learned_today = daily_usage.phrasal_verbs_learned_today + 1,
                    updated_at = NOW()
                WHERE daily_usage.phrasal_verbs_learned_today < $3
                "#
            }
            (UsageCounter::PhrasalVerbs, false) => {
                r#"
                INSERT INTO daily_usage (user_id, date, phrasal_verbs_learned_today)
                VALUES ($1, $2, 1)
                ON CONFLICT (user_id, date) DO UPDATE
                SET phrasal_verbs_learned_today = daily_usage.phrasal_verbs_learned_today + 1,
                    updated_at = NOW()
                "#
            }
            (UsageCounter::Games, true) => {
                r#"
                INSERT INTO daily_usage (user_id, date, games_played_today)
                VALUES ($1, $2, 1)
                ON CONFLICT (user_id, date) DO UPDATE
                SET games_played_today = daily_usage.games_played_today + 1,
                    updated_at = NOW()
                WHERE daily_usage.games_played_today < $3
                "#
            }
            (UsageCounter::Games, false) => {
                r#"
                INSERT INTO daily_usage (user_id, date, games_played_today)
                VALUES ($1, $2, 1)
                ON CONFLICT (user_id, date) DO UPDATE
                SET games_played_today = daily_usage.games_played_today + 1,
                    updated_at = NOW()
                "#
            }
        };

        let mut q = sqlx::query(query).bind(user_id).bind(date);
        if let Some(ceiling) = ceiling {
            q = q.bind(ceiling);
        }
        let result = q.execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    // === User Stats Repository ===

    /// Get lifetime stats for a user
    pub async fn get_user_stats(&self, user_id: Uuid) -> Result<Option<DbUserStats>> {
        let stats = sqlx::query_as::<_, DbUserStats>(
            r#"
            SELECT user_id, words_learned, games_completed, phrasal_verbs_learned,
                   current_streak, total_study_days, level_progress, updated_at
            FROM user_stats
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Add one to the lifetime words_learned counter
    pub async fn increment_words_learned(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_stats (user_id, words_learned)
            VALUES ($1, 1)
            ON CONFLICT (user_id) DO UPDATE
            SET words_learned = user_stats.words_learned + 1,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Add one to the lifetime games_completed counter
    pub async fn increment_games_completed(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_stats (user_id, games_completed)
            VALUES ($1, 1)
            ON CONFLICT (user_id) DO UPDATE
            SET games_completed = user_stats.games_completed + 1,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Add one to the lifetime phrasal_verbs_learned counter
    pub async fn increment_phrasal_verbs_learned(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_stats (user_id, phrasal_verbs_learned)
            VALUES ($1, 1)
            ON CONFLICT (user_id) DO UPDATE
            SET phrasal_verbs_learned = user_stats.phrasal_verbs_learned + 1,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record the first activity of a new study day: bump total_study_days
    /// and either extend or restart the streak.
    pub async fn record_study_day(&self, user_id: Uuid, continues_streak: bool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_stats (user_id, total_study_days, current_streak)
            VALUES ($1, 1, 1)
            ON CONFLICT (user_id) DO UPDATE
            SET total_study_days = user_stats.total_study_days + 1,
                current_streak = CASE WHEN $2 THEN user_stats.current_streak + 1 ELSE 1 END,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(continues_streak)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Achievement Repository ===

    /// Get the full achievement catalog, smallest thresholds first
    pub async fn get_achievements(&self) -> Result<Vec<DbAchievement>> {
        let achievements = sqlx::query_as::<_, DbAchievement>(
            r#"
            SELECT id, title, description, icon, requirement_type, requirement_value, created_at
            FROM achievements
            ORDER BY requirement_value, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(achievements)
    }

    /// Get a user's earned achievements, newest first
    pub async fn get_user_achievements(&self, user_id: Uuid) -> Result<Vec<DbUserAchievement>> {
        let earned = sqlx::query_as::<_, DbUserAchievement>(
            r#"
            SELECT id, user_id, achievement_id, earned_at
            FROM user_achievements
            WHERE user_id = $1
            ORDER BY earned_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(earned)
    }

    /// Award an achievement. Inserting an already-earned pair is a benign
    /// no-op; returns whether a new row was created.
    pub async fn award_achievement(&self, user_id: Uuid, achievement_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_achievements (user_id, achievement_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, achievement_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(achievement_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
