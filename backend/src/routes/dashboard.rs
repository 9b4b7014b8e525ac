//! Dashboard API routes

use crate::error::ApiResult;
use crate::services::DashboardService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use fittrack_shared::{DailyReport, WeeklySummary};
use uuid::Uuid;

/// Create dashboard routes, nested under `/users/:user_id/dashboard`
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/calorie-balance", get(calorie_balance))
        .route("/weekly-summary", get(weekly_summary))
}

/// GET /api/v1/users/:user_id/dashboard/calorie-balance - Today's balance
async fn calorie_balance(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<DailyReport>> {
    let today = Utc::now().date_naive();
    let report = DashboardService::calorie_balance(state.db(), user_id, today).await?;
    Ok(Json(report))
}

/// GET /api/v1/users/:user_id/dashboard/weekly-summary - Last seven days
async fn weekly_summary(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<WeeklySummary>> {
    let today = Utc::now().date_naive();
    let summary = DashboardService::weekly_summary(state.db(), user_id, today).await?;
    Ok(Json(summary))
}
