//! Daily and weekly calorie balance aggregation
//!
//! Combines a [`CalorieProfile`] with consumed/burned totals supplied by the
//! persistence layer. Pure functions only; the caller decides what "today" is.

use crate::biometrics::UserBiometrics;
use crate::calories::CalorieProfile;
use crate::units::{round_kcal, round_tenth};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days covered by the weekly summary, today included
pub const WEEKLY_WINDOW_DAYS: u32 = 7;

/// How far over target a day may go before it counts as over
pub const OVER_TARGET_TOLERANCE: i64 = 200;

// ============================================================================
// Daily balance
// ============================================================================

/// Totals for one calendar day, summed by the persistence layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub calories_consumed: i64,
    pub calories_burned_exercise: i64,
    pub meal_count: i64,
    pub workout_count: i64,
}

/// Calorie balance for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub calories_consumed: i64,
    pub calories_burned_exercise: i64,
    pub net_calories: i64,
    pub target_calories: Option<i64>,
    pub remaining_calories: Option<i64>,
    pub percentage_consumed: Option<f64>,
    pub meal_count: i64,
    pub workout_count: i64,
}

/// Weight goal snapshot echoed on the daily report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGoals {
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    /// target − current; negative while losing
    pub weight_to_goal: Option<f64>,
    pub weekly_rate: Option<f64>,
}

impl UserGoals {
    pub fn from_biometrics(bio: &UserBiometrics) -> Self {
        let weight_to_goal = match (bio.weight_lbs, bio.target_weight_lbs) {
            (Some(current), Some(target)) => Some(target - current),
            _ => None,
        };
        Self {
            current_weight: bio.weight_lbs,
            target_weight: bio.target_weight_lbs,
            weight_to_goal,
            weekly_rate: bio.weight_goal_rate,
        }
    }
}

/// Daily calorie balance report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub calorie_profile: CalorieProfile,
    pub today: DailyBalance,
    pub user_goals: UserGoals,
    pub tips: Vec<String>,
}

fn remaining(target: Option<i64>, net: i64) -> Option<i64> {
    target.map(|t| t.saturating_sub(net))
}

/// Compute the balance for one day
pub fn compute_daily_balance(
    profile: &CalorieProfile,
    date: NaiveDate,
    totals: DailyTotals,
) -> DailyBalance {
    let net = totals
        .calories_consumed
        .saturating_sub(totals.calories_burned_exercise);
    let target = profile.target_calories;
    let percentage_consumed = target
        .filter(|t| *t > 0)
        .map(|t| round_tenth(net as f64 / t as f64 * 100.0));

    DailyBalance {
        date,
        calories_consumed: totals.calories_consumed,
        calories_burned_exercise: totals.calories_burned_exercise,
        net_calories: net,
        target_calories: target,
        remaining_calories: remaining(target, net),
        percentage_consumed,
        meal_count: totals.meal_count,
        workout_count: totals.workout_count,
    }
}

/// Tips for the daily report
///
/// At most one "remaining" tip, then an ETA tip while a loss goal is active
/// and the user is still above their target weight.
pub fn balance_tips(balance: &DailyBalance, bio: &UserBiometrics) -> Vec<String> {
    let mut tips = Vec::new();

    if let Some(left) = balance.remaining_calories {
        if left > 0 {
            tips.push(format!("You have {left} calories remaining for today"));
        } else if left < -OVER_TARGET_TOLERANCE {
            tips.push(format!(
                "You're {} calories over your target. Consider adjusting tomorrow or adding exercise",
                left.abs()
            ));
        } else {
            tips.push("You're right on target! Great job!".to_string());
        }
    }

    if let Some(weeks) = weeks_to_goal(bio) {
        tips.push(format!(
            "At your current rate, you'll reach your goal in about {weeks:.1} weeks"
        ));
    }

    tips
}

/// Weeks until the target weight at the current loss rate
///
/// Only defined for an active loss goal with a positive amount left to lose.
pub fn weeks_to_goal(bio: &UserBiometrics) -> Option<f64> {
    let rate = bio.weight_goal_rate.filter(|r| *r < 0.0)?;
    let weight_diff = bio.weight_lbs? - bio.target_weight_lbs?;
    (weight_diff > 0.0).then(|| round_tenth(weight_diff / rate.abs()))
}

/// Build the full daily report
pub fn daily_report(
    profile: CalorieProfile,
    bio: &UserBiometrics,
    date: NaiveDate,
    totals: DailyTotals,
) -> DailyReport {
    let today = compute_daily_balance(&profile, date, totals);
    let tips = balance_tips(&today, bio);
    DailyReport {
        calorie_profile: profile,
        today,
        user_goals: UserGoals::from_biometrics(bio),
        tips,
    }
}

// ============================================================================
// Weekly summary
// ============================================================================

/// Consumed/burned sums for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySums {
    pub date: NaiveDate,
    pub calories_consumed: i64,
    pub calories_burned: i64,
}

/// One day of the weekly summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub calories_consumed: i64,
    pub calories_burned: i64,
    pub net_calories: i64,
    pub target_calories: Option<i64>,
    pub remaining_calories: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAverages {
    pub avg_consumed: i64,
    pub avg_burned: i64,
    pub avg_net_calories: i64,
    pub target_calories: Option<i64>,
}

/// Seven-day calorie summary, oldest day first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub period: SummaryPeriod,
    pub daily_data: Vec<DayEntry>,
    pub weekly_averages: WeeklyAverages,
    pub calorie_profile: CalorieProfile,
}

/// First day of the window ending on `today`
pub fn weekly_window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(WEEKLY_WINDOW_DAYS - 1)))
        .unwrap_or(NaiveDate::MIN)
}

/// `period.start` reported on the summary: one full week before `today`,
/// the day before the first row in `daily_data`
pub fn summary_period_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(WEEKLY_WINDOW_DAYS)))
        .unwrap_or(NaiveDate::MIN)
}

/// Summarize the seven days ending on `today`
///
/// `rows` may be sparse and unordered: days without a row count as zero and
/// rows outside the window are ignored. Averages are taken over raw totals,
/// so `avg_net_calories` is `round((Σconsumed − Σburned) / 7)`, not the mean
/// of rounded daily nets.
pub fn compute_weekly_summary(
    profile: CalorieProfile,
    today: NaiveDate,
    rows: &[DaySums],
) -> WeeklySummary {
    let start = weekly_window_start(today);
    let target = profile.target_calories;

    let daily_data: Vec<DayEntry> = start
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|day| {
            let (consumed, burned) = rows
                .iter()
                .filter(|row| row.date == day)
                .fold((0, 0), |(c, b), row| (c + row.calories_consumed, b + row.calories_burned));
            let net = consumed - burned;
            DayEntry {
                date: day,
                calories_consumed: consumed,
                calories_burned: burned,
                net_calories: net,
                target_calories: target,
                remaining_calories: remaining(target, net),
            }
        })
        .collect();

    let total_consumed: i64 = daily_data.iter().map(|d| d.calories_consumed).sum();
    let total_burned: i64 = daily_data.iter().map(|d| d.calories_burned).sum();
    let days = f64::from(WEEKLY_WINDOW_DAYS);

    WeeklySummary {
        period: SummaryPeriod {
            start: summary_period_start(today),
            end: today,
            days: WEEKLY_WINDOW_DAYS,
        },
        daily_data,
        weekly_averages: WeeklyAverages {
            avg_consumed: round_kcal(total_consumed as f64 / days),
            avg_burned: round_kcal(total_burned as f64 / days),
            avg_net_calories: round_kcal((total_consumed - total_burned) as f64 / days),
            target_calories: target,
        },
        calorie_profile: profile,
    }
}
