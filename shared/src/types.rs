//! API response types shared with browser clients

use crate::plans::{FitnessLevel, GoalFocus, MealPlanDay, WorkoutPlanDay};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Coach Types
// ============================================================================

/// Where a coach reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// Generated by the chat-completion model
    Model,
    /// Static keyword-routed reply
    Fallback,
}

/// Coach chat response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachChatResponse {
    pub reply: String,
    pub source: ReplySource,
}

/// Motivational message response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationResponse {
    pub message: String,
}

/// Meal plan response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanResponse {
    pub goal_focus: GoalFocus,
    pub start_date: NaiveDate,
    pub days: u32,
    pub plan: Vec<MealPlanDay>,
}

/// Workout plan response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlanResponse {
    pub fitness_level: FitnessLevel,
    pub start_date: NaiveDate,
    pub days: u32,
    pub plan: Vec<WorkoutPlanDay>,
}
