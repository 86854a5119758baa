//! User registration and profile endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::BadRequest("Email must not be empty".to_string()));
    }

    let user = state.db.create_user(payload.email.trim()).await?;

    Ok(Json(RegisterResponse {
        user_id: user.id,
        token: user.token,
    }))
}

/// GET /api/users/me
pub async fn me(Extension(auth): Extension<AuthenticatedUser>) -> Result<Json<MeResponse>> {
    Ok(Json(MeResponse {
        user_id: auth.user.id,
        email: auth.user.email.clone(),
        plan: auth.user.plan(),
    }))
}
