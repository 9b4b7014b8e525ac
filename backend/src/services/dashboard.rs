//! Dashboard service
//!
//! Loads biometrics and ledger sums, then hands them to the pure calorie
//! engine in `fittrack_shared`. Nothing here is cached: every call reflects
//! the current stored biometrics.

use crate::error::ApiError;
use crate::repositories::EnergyLedgerRepository;
use crate::services::UserService;
use chrono::NaiveDate;
use fittrack_shared::balance::{self, DailyReport, WeeklySummary};
use fittrack_shared::calories::{calculate_full_profile, CalorieProfile};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Dashboard service for business logic
pub struct DashboardService;

impl DashboardService {
    /// Calorie profile from the user's stored biometrics
    pub async fn calorie_profile(pool: &PgPool, user_id: Uuid) -> Result<CalorieProfile, ApiError> {
        let user = UserService::get_user(pool, user_id).await?;
        Ok(calculate_full_profile(&user.biometrics()))
    }

    /// Today's balance against the target, with tips and goal progress
    pub async fn calorie_balance(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<DailyReport, ApiError> {
        let user = UserService::get_user(pool, user_id).await?;
        let biometrics = user.biometrics();
        let profile = calculate_full_profile(&biometrics);
        let totals = EnergyLedgerRepository::day_totals(pool, user_id, today).await?;

        debug!(
            %user_id,
            consumed = totals.calories_consumed,
            burned = totals.calories_burned_exercise,
            "Computed daily totals"
        );

        Ok(balance::daily_report(profile, &biometrics, today, totals))
    }

    /// Seven-day summary ending on `today`
    pub async fn weekly_summary(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<WeeklySummary, ApiError> {
        let user = UserService::get_user(pool, user_id).await?;
        let profile = calculate_full_profile(&user.biometrics());
        let start = balance::weekly_window_start(today);
        let rows = EnergyLedgerRepository::daily_sums(pool, user_id, start, today).await?;

        debug!(%user_id, days_with_entries = rows.len(), "Loaded weekly sums");

        Ok(balance::compute_weekly_summary(profile, today, &rows))
    }
}
