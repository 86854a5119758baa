//! Achievement endpoints

use std::collections::HashMap;

use axum::{extract::State, Extension, Json};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/achievements
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<AchievementsResponse>> {
    let mut all_achievements = Vec::new();
    for row in state.db.get_achievements().await? {
        all_achievements.push(row.to_core_achievement()?);
    }

    let by_id: HashMap<Uuid, &Achievement> =
        all_achievements.iter().map(|a| (a.id, a)).collect();

    let user_achievements = state
        .db
        .get_user_achievements(auth.user.id)
        .await?
        .into_iter()
        .filter_map(|earned| {
            by_id.get(&earned.achievement_id).map(|a| EarnedAchievement {
                achievement: (*a).clone(),
                earned_at: earned.earned_at,
            })
        })
        .collect();

    Ok(Json(AchievementsResponse {
        user_achievements,
        all_achievements,
    }))
}
