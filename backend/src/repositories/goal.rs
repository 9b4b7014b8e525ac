//! Goal repository - read side used by coach recommendations

use anyhow::Result;
use chrono::{DateTime, Utc};
use fittrack_shared::insights::GoalProgress;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Status of goals still being worked on
pub const ACTIVE_STATUS: &str = "active";

/// Goal record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_type: String,
    pub title: String,
    pub target_value: Decimal,
    pub current_value: Decimal,
    pub unit: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl GoalRecord {
    pub fn progress(&self) -> GoalProgress {
        GoalProgress {
            title: self.title.clone(),
            target_value: self.target_value.to_f64().unwrap_or(0.0),
            current_value: self.current_value.to_f64().unwrap_or(0.0),
        }
    }
}

/// Input for creating a goal
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub goal_type: String,
    pub title: String,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: Option<String>,
}

const GOAL_COLUMNS: &str =
    "id, user_id, goal_type, title, target_value, current_value, unit, status, created_at";

/// Goal repository
pub struct GoalRepository;

impl GoalRepository {
    /// Active goals for a user, oldest first
    pub async fn active_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<GoalRecord>> {
        let goals = sqlx::query_as::<_, GoalRecord>(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE user_id = $1 AND status = $2 ORDER BY created_at"
        ))
        .bind(user_id)
        .bind(ACTIVE_STATUS)
        .fetch_all(pool)
        .await?;

        Ok(goals)
    }

    /// Create an active goal
    pub async fn create(pool: &PgPool, user_id: Uuid, input: NewGoal) -> Result<GoalRecord> {
        let goal = sqlx::query_as::<_, GoalRecord>(&format!(
            r#"
            INSERT INTO goals (user_id, goal_type, title, target_value, current_value, unit)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&input.goal_type)
        .bind(&input.title)
        .bind(Decimal::try_from(input.target_value)?)
        .bind(Decimal::try_from(input.current_value)?)
        .bind(&input.unit)
        .fetch_one(pool)
        .await?;

        Ok(goal)
    }
}
