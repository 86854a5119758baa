//! Daily content endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::selection;
use crate::AppState;

fn parse_level(level: Option<&str>) -> Result<Option<Level>> {
    match level {
        None => Ok(None),
        Some(s) => Level::from_str(s)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown level: {s}"))),
    }
}

/// GET /api/content/vocabulary
pub async fn vocabulary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<LevelQuery>,
) -> Result<Json<DailyVocabularyResponse>> {
    let level = parse_level(query.level.as_deref())?;
    let words = selection::daily_vocabulary(&state.db, auth.user.id, level).await?;

    Ok(Json(DailyVocabularyResponse { words }))
}

/// GET /api/content/phrasal-verbs
pub async fn phrasal_verbs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<LevelQuery>,
) -> Result<Json<DailyPhrasalVerbsResponse>> {
    let level = parse_level(query.level.as_deref())?;
    let verbs = selection::daily_phrasal_verbs(&state.db, auth.user.id, level).await?;

    Ok(Json(DailyPhrasalVerbsResponse { verbs }))
}

/// GET /api/content/game-questions
pub async fn game_questions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<GameTypeQuery>,
) -> Result<Json<DailyGameQuestionsResponse>> {
    let game = GameKind::from_str(&query.game_type)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown game type: {}", query.game_type)))?;
    let questions = selection::daily_game_questions(&state.db, auth.user.id, game).await?;

    Ok(Json(DailyGameQuestionsResponse { questions }))
}
