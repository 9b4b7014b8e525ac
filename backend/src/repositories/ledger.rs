//! Energy ledger repository - calories eaten and burned per user
//!
//! Consumption lives in `nutrition_logs`, expenditure in `activities`. All day
//! boundaries are UTC calendar days.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use fittrack_shared::insights::{ActivitySample, MealSample};
use fittrack_shared::{DailyTotals, DaySums};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Input for logging a meal
#[derive(Debug, Clone)]
pub struct NewMealLog {
    pub meal_type: String,
    pub food_name: String,
    pub calories: i32,
    pub protein_g: Option<f64>,
    pub logged_at: DateTime<Utc>,
}

/// Input for logging an activity
#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub activity_type: String,
    pub title: String,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
    pub intensity: Option<String>,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ActivityRow {
    activity_type: String,
    intensity: Option<String>,
    duration_minutes: Option<i32>,
    logged_at: DateTime<Utc>,
}

impl From<ActivityRow> for ActivitySample {
    fn from(row: ActivityRow) -> Self {
        Self {
            activity_type: row.activity_type,
            intensity: row.intensity,
            duration_minutes: row.duration_minutes,
            day: row.logged_at.date_naive(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MealRow {
    calories: i32,
    protein_g: Option<Decimal>,
}

impl From<MealRow> for MealSample {
    fn from(row: MealRow) -> Self {
        Self {
            calories: i64::from(row.calories),
            protein_g: row.protein_g.and_then(|p| p.to_f64()),
        }
    }
}

/// Half-open UTC range covering the calendar days `first..=last`
fn utc_bounds(first: NaiveDate, last: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&first.and_time(NaiveTime::MIN));
    let end = last
        .succ_opt()
        .map(|next| Utc.from_utc_datetime(&next.and_time(NaiveTime::MIN)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}

/// Energy ledger repository
pub struct EnergyLedgerRepository;

impl EnergyLedgerRepository {
    /// Consumed and burned totals plus entry counts for one UTC day
    pub async fn day_totals(db: &PgPool, user_id: Uuid, day: NaiveDate) -> Result<DailyTotals> {
        let (start, end) = utc_bounds(day, day);

        let row = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COALESCE(SUM(calories), 0)::BIGINT FROM nutrition_logs
                  WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3) AS consumed,
                (SELECT COALESCE(SUM(calories_burned), 0)::BIGINT FROM activities
                  WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3) AS burned,
                (SELECT COUNT(*) FROM nutrition_logs
                  WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3) AS meal_count,
                (SELECT COUNT(*) FROM activities
                  WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3) AS workout_count
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(db)
        .await?;

        Ok(DailyTotals {
            calories_consumed: row.0,
            calories_burned_exercise: row.1,
            meal_count: row.2,
            workout_count: row.3,
        })
    }

    /// Per-day consumed/burned sums for `first..=last`
    ///
    /// Days with no entries are omitted.
    pub async fn daily_sums(
        db: &PgPool,
        user_id: Uuid,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<DaySums>> {
        let (start, end) = utc_bounds(first, last);

        let rows = sqlx::query_as::<_, (NaiveDate, i64, i64)>(
            r#"
            WITH entries AS (
                SELECT (logged_at AT TIME ZONE 'UTC')::DATE AS day,
                       calories::BIGINT AS consumed,
                       0::BIGINT AS burned
                FROM nutrition_logs
                WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3
                UNION ALL
                SELECT (logged_at AT TIME ZONE 'UTC')::DATE AS day,
                       0::BIGINT AS consumed,
                       COALESCE(calories_burned, 0)::BIGINT AS burned
                FROM activities
                WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3
            )
            SELECT day, SUM(consumed)::BIGINT, SUM(burned)::BIGINT
            FROM entries
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, consumed, burned)| DaySums {
                date,
                calories_consumed: consumed,
                calories_burned: burned,
            })
            .collect())
    }

    /// Most recent activities, newest first
    ///
    /// `since` bounds the range from below; `limit` of `None` returns every match.
    pub async fn recent_activities(
        db: &PgPool,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
        limit: Option<i64>,
    ) -> Result<Vec<ActivitySample>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT activity_type, intensity, duration_minutes, logged_at
            FROM activities
            WHERE user_id = $1 AND ($2::TIMESTAMPTZ IS NULL OR logged_at >= $2)
            ORDER BY logged_at DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(since)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(ActivitySample::from).collect())
    }

    /// Most recent meals, newest first
    pub async fn recent_meals(
        db: &PgPool,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
        limit: Option<i64>,
    ) -> Result<Vec<MealSample>> {
        let rows = sqlx::query_as::<_, MealRow>(
            r#"
            SELECT calories, protein_g
            FROM nutrition_logs
            WHERE user_id = $1 AND ($2::TIMESTAMPTZ IS NULL OR logged_at >= $2)
            ORDER BY logged_at DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(since)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(MealSample::from).collect())
    }

    /// Record a meal
    pub async fn log_meal(db: &PgPool, user_id: Uuid, input: NewMealLog) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO nutrition_logs (user_id, meal_type, food_name, calories, protein_g, logged_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(&input.meal_type)
        .bind(&input.food_name)
        .bind(input.calories)
        .bind(input.protein_g.and_then(|p| Decimal::try_from(p).ok()))
        .bind(input.logged_at)
        .fetch_one(db)
        .await?;

        Ok(id)
    }

    /// Record an activity
    pub async fn log_activity(db: &PgPool, user_id: Uuid, input: NewActivityLog) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO activities (
                user_id, activity_type, title, duration_minutes,
                calories_burned, intensity, logged_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(&input.activity_type)
        .bind(&input.title)
        .bind(input.duration_minutes)
        .bind(input.calories_burned)
        .bind(&input.intensity)
        .bind(input.logged_at)
        .fetch_one(db)
        .await?;

        Ok(id)
    }
}
