//! Learning and game-completion endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::progress;
use crate::AppState;

/// POST /api/learn/word
pub async fn learn_word(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<LearnWordRequest>,
) -> Result<Json<LearnResponse>> {
    let outcome = progress::learn_word(&state.db, &auth.user, payload.word_id).await?;

    Ok(Json(LearnResponse {
        success: outcome.success,
        remaining: outcome.remaining,
        new_achievements: outcome.new_achievements,
    }))
}

/// POST /api/learn/phrasal-verb
pub async fn learn_phrasal_verb(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<LearnPhrasalVerbRequest>,
) -> Result<Json<LearnResponse>> {
    let outcome = progress::learn_phrasal_verb(&state.db, &auth.user, payload.verb_id).await?;

    Ok(Json(LearnResponse {
        success: outcome.success,
        remaining: outcome.remaining,
        new_achievements: outcome.new_achievements,
    }))
}

/// POST /api/games/complete
pub async fn complete_game(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CompleteGameRequest>,
) -> Result<Json<CompleteGameResponse>> {
    if GameKind::from_str(&payload.game_type).is_none() {
        return Err(ApiError::BadRequest(format!(
            "Unknown game type: {}",
            payload.game_type
        )));
    }
    if payload.score < 0 {
        return Err(ApiError::BadRequest("Score must not be negative".to_string()));
    }

    let new_achievements = progress::complete_game(&state.db, &auth.user).await?;

    Ok(Json(CompleteGameResponse {
        success: true,
        new_achievements,
    }))
}

/// GET /api/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<UserStats>> {
    let stats = progress::user_stats(&state.db, auth.user.id).await?;
    Ok(Json(stats))
}
