//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helper functions for creating test users and catalog rows
//! - Authentication helpers
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL).

pub mod fixtures;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use lexiday_backend::db::Database;
use lexiday_backend::models::User;
use lexiday_backend::routes;
use lexiday_backend::AppState;

/// Test context containing database connection and test server.
///
/// Use this to set up integration tests with a real database connection.
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(db);

        let state = AppState { db: db.clone() };
        let app = build_test_router(state);

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test user and return it along with its token.
    pub async fn create_test_user(&self) -> User {
        let email = format!("test-{}@example.com", &Uuid::new_v4().to_string()[..8]);
        self.db
            .create_user(&email)
            .await
            .expect("Failed to create test user")
    }

    /// Create a test user on the given plan.
    pub async fn create_test_user_on_plan(&self, plan: &str) -> User {
        let user = self.create_test_user().await;
        self.db
            .set_user_plan(user.id, plan)
            .await
            .expect("Failed to set test user plan");
        self.db
            .get_user_by_token(&user.token)
            .await
            .expect("Failed to re-read test user")
            .expect("Test user vanished")
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Insert vocabulary rows at the given level; returns their ids.
    pub async fn seed_vocabulary(&self, count: usize, level: &str, category: &str) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO vocabulary (word, translation, example, level, category)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
            )
            .bind(format!("word-{i}"))
            .bind(format!("palabra-{i}"))
            .bind(format!("Example sentence {i}."))
            .bind(level)
            .bind(category)
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to seed vocabulary");
            ids.push(id);
        }
        ids
    }

    /// Insert phrasal-verb rows at the given level; returns their ids.
    pub async fn seed_phrasal_verbs(&self, count: usize, level: &str, category: &str) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO phrasal_verbs (verb, meaning, example, level, category)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
            )
            .bind(format!("give up {i}"))
            .bind(format!("meaning {i}"))
            .bind(format!("Example sentence {i}."))
            .bind(level)
            .bind(category)
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to seed phrasal verbs");
            ids.push(id);
        }
        ids
    }

    /// Insert question-bank rows for one game; returns their ids.
    pub async fn seed_game_questions(&self, count: usize, game_type: &str) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO game_questions (game_type, question, correct_answer, options)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(game_type)
            .bind(format!("Question {i}?"))
            .bind(format!("answer-{i}"))
            .bind(vec![format!("answer-{i}"), "other".to_string()])
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to seed game questions");
            ids.push(id);
        }
        ids
    }

    /// Remove seeded catalog rows.
    pub async fn cleanup_catalog(&self, table: &str, ids: &[Uuid]) {
        let query = match table {
            "vocabulary" => "DELETE FROM vocabulary WHERE id = ANY($1)",
            "phrasal_verbs" => "DELETE FROM phrasal_verbs WHERE id = ANY($1)",
            "game_questions" => "DELETE FROM game_questions WHERE id = ANY($1)",
            _ => panic!("unknown catalog table {table}"),
        };
        let _ = sqlx::query(query).bind(ids).execute(self.db.pool()).await;
    }

    /// Clean up test data for a user.
    ///
    /// Call this after tests to remove test data.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        // Delete in order due to foreign keys
        let _ = sqlx::query("DELETE FROM user_achievements WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM daily_usage WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM daily_content WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM user_stats WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }
}

/// Build the test router with all routes.
fn build_test_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/users/me", get(routes::users::me))
        .route("/api/content/vocabulary", get(routes::content::vocabulary))
        .route(
            "/api/content/phrasal-verbs",
            get(routes::content::phrasal_verbs),
        )
        .route(
            "/api/content/game-questions",
            get(routes::content::game_questions),
        )
        .route("/api/limits", get(routes::limits::get))
        .route("/api/learn/word", post(routes::progress::learn_word))
        .route(
            "/api/learn/phrasal-verb",
            post(routes::progress::learn_phrasal_verb),
        )
        .route("/api/games/complete", post(routes::progress::complete_game))
        .route("/api/stats", get(routes::progress::stats))
        .route("/api/achievements", get(routes::achievements::list))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/users/register", post(routes::users::register))
        .merge(protected_routes)
        .with_state(state)
}
