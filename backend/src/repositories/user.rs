//! User repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use fittrack_shared::coach::CoachContext;
use fittrack_shared::UserBiometrics;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub weight_lbs: Option<Decimal>,
    pub height_feet: Option<i32>,
    pub height_inches: Option<i32>,
    pub activity_level: Option<String>,
    pub weight_goal_rate: Option<Decimal>,
    pub target_weight_lbs: Option<Decimal>,
    pub fitness_level: Option<String>,
    pub primary_goal: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Biometrics snapshot for the calorie engine
    pub fn biometrics(&self) -> UserBiometrics {
        UserBiometrics {
            weight_lbs: self.weight_lbs.and_then(|d| d.to_f64()),
            height_feet: self.height_feet,
            height_inches: self.height_inches,
            age: self.age,
            gender: self.gender.clone(),
            activity_level: self.activity_level.clone(),
            weight_goal_rate: self.weight_goal_rate.and_then(|d| d.to_f64()),
            target_weight_lbs: self.target_weight_lbs.and_then(|d| d.to_f64()),
        }
    }

    /// What the coach is told about this user
    pub fn coach_context(&self) -> CoachContext {
        CoachContext {
            display_name: self
                .first_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| self.username.clone()),
            fitness_level: self.fitness_level.clone(),
            primary_goal: self.primary_goal.clone(),
            age: self.age,
        }
    }
}

/// Input for creating a user
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub weight_lbs: Option<f64>,
    pub height_feet: Option<i32>,
    pub height_inches: Option<i32>,
    pub activity_level: Option<String>,
    pub weight_goal_rate: Option<f64>,
    pub target_weight_lbs: Option<f64>,
    pub fitness_level: Option<String>,
    pub primary_goal: Option<String>,
}

const USER_COLUMNS: &str = "id, email, username, first_name, age, gender, weight_lbs, \
     height_feet, height_inches, activity_level, weight_goal_rate, target_weight_lbs, \
     fitness_level, primary_goal, created_at, updated_at";

fn to_decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(|v| Decimal::try_from(v).ok())
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Create a new user
    pub async fn create(pool: &PgPool, input: NewUser) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (
                email, username, first_name, age, gender, weight_lbs,
                height_feet, height_inches, activity_level, weight_goal_rate,
                target_weight_lbs, fitness_level, primary_goal
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&input.email)
        .bind(&input.username)
        .bind(&input.first_name)
        .bind(input.age)
        .bind(&input.gender)
        .bind(to_decimal(input.weight_lbs))
        .bind(input.height_feet)
        .bind(input.height_inches)
        .bind(&input.activity_level)
        .bind(to_decimal(input.weight_goal_rate))
        .bind(to_decimal(input.target_weight_lbs))
        .bind(&input.fitness_level)
        .bind(&input.primary_goal)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }
}
