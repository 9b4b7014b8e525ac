//! Rule-based coach features: recommendations, patterns, motivation
//!
//! Loads recent history and hands it to `fittrack_shared::insights`.

use crate::error::ApiError;
use crate::repositories::{EnergyLedgerRepository, GoalRepository};
use crate::services::UserService;
use chrono::{DateTime, Duration, Utc};
use fittrack_shared::insights::{
    self, PatternAnalysis, Recommendations, MOTIVATION_ENTRY_LIMIT, PATTERN_WINDOW_DAYS,
    RECENT_ENTRY_LIMIT,
};
use rand::seq::SliceRandom;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Insights service
pub struct InsightsService;

impl InsightsService {
    /// Workout, nutrition, recovery and goal advice from the latest entries
    pub async fn recommendations(pool: &PgPool, user_id: Uuid) -> Result<Recommendations, ApiError> {
        UserService::get_user(pool, user_id).await?;

        let limit = Some(RECENT_ENTRY_LIMIT);
        let activities = EnergyLedgerRepository::recent_activities(pool, user_id, None, limit).await?;
        let meals = EnergyLedgerRepository::recent_meals(pool, user_id, None, limit).await?;
        let goals: Vec<_> = GoalRepository::active_for_user(pool, user_id)
            .await?
            .iter()
            .map(|g| g.progress())
            .collect();

        debug!(
            %user_id,
            activities = activities.len(),
            meals = meals.len(),
            goals = goals.len(),
            "Loaded history for recommendations"
        );

        Ok(insights::recommendations(&activities, &meals, &goals))
    }

    /// Trends and consistency over the window ending at `now`
    pub async fn patterns(
        pool: &PgPool,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<PatternAnalysis, ApiError> {
        UserService::get_user(pool, user_id).await?;

        let since = Some(now - Duration::days(i64::from(PATTERN_WINDOW_DAYS)));
        let activities = EnergyLedgerRepository::recent_activities(pool, user_id, since, None).await?;
        let meals = EnergyLedgerRepository::recent_meals(pool, user_id, since, None).await?;

        debug!(
            %user_id,
            activities = activities.len(),
            meals = meals.len(),
            "Loaded history for pattern analysis"
        );

        Ok(insights::analyze_patterns(&activities, &meals))
    }

    /// One motivational message, picked at random from the matching set
    pub async fn motivational_message(pool: &PgPool, user_id: Uuid) -> Result<String, ApiError> {
        let user = UserService::get_user(pool, user_id).await?;
        let recent = EnergyLedgerRepository::recent_activities(
            pool,
            user_id,
            None,
            Some(MOTIVATION_ENTRY_LIMIT),
        )
        .await?;

        let name = user.coach_context().display_name;
        let messages = insights::motivational_messages(&name, recent.len());
        let message = messages
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default();

        Ok(message)
    }
}
