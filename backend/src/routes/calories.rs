//! Calorie profile routes

use crate::error::ApiResult;
use crate::services::DashboardService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::post,
    Json, Router,
};
use fittrack_shared::calories::{calculate_full_profile, CalorieProfile};
use fittrack_shared::UserBiometrics;
use uuid::Uuid;

/// Stateless calculator routes
pub fn calorie_routes() -> Router<AppState> {
    Router::new().route("/profile", post(preview_profile))
}

/// POST /api/v1/calories/profile - Profile for arbitrary biometrics
///
/// Missing fields are not an error; they yield absent values.
async fn preview_profile(
    payload: Result<Json<UserBiometrics>, JsonRejection>,
) -> ApiResult<Json<CalorieProfile>> {
    let Json(biometrics) = payload?;
    Ok(Json(calculate_full_profile(&biometrics)))
}

/// GET /api/v1/users/:user_id/calorie-profile - Profile from stored biometrics
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<CalorieProfile>> {
    let profile = DashboardService::calorie_profile(state.db(), user_id).await?;
    Ok(Json(profile))
}
