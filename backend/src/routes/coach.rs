//! AI coach routes

use crate::error::{ApiError, ApiResult};
use crate::services::{InsightsService, UserService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fittrack_shared::coach::ChatMessage;
use fittrack_shared::insights::{PatternAnalysis, Recommendations};
use fittrack_shared::plans::{self, FitnessLevel, GoalFocus, DEFAULT_PLAN_DAYS};
use fittrack_shared::types::{
    CoachChatResponse, MealPlanResponse, MotivationResponse, WorkoutPlanResponse,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Create coach routes, nested under `/users/:user_id/coach`
pub fn coach_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/meal-plan", get(meal_plan))
        .route("/workout-plan", get(workout_plan))
        .route("/recommendations", get(recommendations))
        .route("/insights", get(insights))
        .route("/motivational-message", get(motivational_message))
}

/// Chat request body
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"))]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

fn default_plan_days() -> u32 {
    DEFAULT_PLAN_DAYS
}

/// Plan length query
#[derive(Debug, Deserialize, Validate)]
pub struct PlanQuery {
    #[serde(default = "default_plan_days")]
    #[validate(range(min = 1, max = 28, message = "must be between 1 and 28"))]
    pub days: u32,
}

/// POST /api/v1/users/:user_id/coach/chat - Ask the coach
async fn chat(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<CoachChatResponse>> {
    let Json(req) = payload?;
    req.validate()?;
    if req.message.trim().is_empty() {
        return Err(ApiError::Validation("message: must not be blank".to_string()));
    }

    let user = UserService::get_user(state.db(), user_id).await?;
    let response = state
        .coach()
        .chat(&user.coach_context(), &req.message, &req.history)
        .await;

    info!(%user_id, source = ?response.source, "Coach chat answered");
    Ok(Json(response))
}

/// GET /api/v1/users/:user_id/coach/meal-plan?days=N - Template meal plan
async fn meal_plan(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PlanQuery>,
) -> ApiResult<Json<MealPlanResponse>> {
    query.validate()?;
    let user = UserService::get_user(state.db(), user_id).await?;

    let focus = GoalFocus::from_primary_goal(user.primary_goal.as_deref());
    let start_date = Utc::now().date_naive();

    Ok(Json(MealPlanResponse {
        goal_focus: focus,
        start_date,
        days: query.days,
        plan: plans::meal_plan(focus, start_date, query.days),
    }))
}

/// GET /api/v1/users/:user_id/coach/workout-plan?days=N - Template workout plan
async fn workout_plan(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PlanQuery>,
) -> ApiResult<Json<WorkoutPlanResponse>> {
    query.validate()?;
    let user = UserService::get_user(state.db(), user_id).await?;

    let level = FitnessLevel::from_label(user.fitness_level.as_deref());
    let start_date = Utc::now().date_naive();

    Ok(Json(WorkoutPlanResponse {
        fitness_level: level,
        start_date,
        days: query.days,
        plan: plans::workout_plan(level, start_date, query.days),
    }))
}

/// GET /api/v1/users/:user_id/coach/recommendations - Rule-based advice
async fn recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Recommendations>> {
    let recommendations = InsightsService::recommendations(state.db(), user_id).await?;
    Ok(Json(recommendations))
}

/// GET /api/v1/users/:user_id/coach/insights - Last 30 days of patterns
async fn insights(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<PatternAnalysis>> {
    let analysis = InsightsService::patterns(state.db(), user_id, Utc::now()).await?;
    Ok(Json(analysis))
}

/// GET /api/v1/users/:user_id/coach/motivational-message
async fn motivational_message(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<MotivationResponse>> {
    let message = InsightsService::motivational_message(state.db(), user_id).await?;
    Ok(Json(MotivationResponse { message }))
}
