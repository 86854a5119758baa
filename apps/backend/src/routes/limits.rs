//! Daily limits endpoint

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::progress;
use crate::AppState;

/// GET /api/limits
///
/// Defaults to the words counter when none is given.
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<LimitsQuery>,
) -> Result<Json<DailyLimitsResponse>> {
    let counter = match query.counter.as_deref() {
        None => UsageCounter::Words,
        Some(s) => UsageCounter::from_str(s)
            .filter(|c| *c != UsageCounter::Games)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown counter: {s}")))?,
    };

    let limits = progress::daily_limits(&state.db, &auth.user, counter).await?;

    Ok(Json(DailyLimitsResponse {
        plan: auth.user.plan(),
        counter: counter.as_str().to_string(),
        limits,
    }))
}
