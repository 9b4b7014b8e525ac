//! Rule-based coaching: recommendations, activity patterns and motivation
//!
//! No model involved. The backend loads recent history, these functions turn
//! it into advice from fixed thresholds and message tables.

use crate::units::round_tenth;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Entries considered for recommendations
pub const RECENT_ENTRY_LIMIT: i64 = 10;

/// Entries considered for the motivational message
pub const MOTIVATION_ENTRY_LIMIT: i64 = 5;

/// Days covered by the pattern analysis
pub const PATTERN_WINDOW_DAYS: u32 = 30;

const NOT_ENOUGH_DATA: &str = "Not enough data to analyze trends";

// ============================================================================
// Inputs
// ============================================================================

/// One logged activity, as far as the rules care
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySample {
    pub activity_type: String,
    pub intensity: Option<String>,
    pub duration_minutes: Option<i32>,
    /// UTC calendar day the activity was logged on
    pub day: NaiveDate,
}

/// One logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSample {
    pub calories: i64,
    pub protein_g: Option<f64>,
}

/// An active goal and how far along it is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub title: String,
    pub target_value: f64,
    pub current_value: f64,
}

impl GoalProgress {
    /// Percent complete; 0 when the target is not positive
    pub fn percent(&self) -> f64 {
        if self.target_value > 0.0 {
            self.current_value / self.target_value * 100.0
        } else {
            0.0
        }
    }
}

// ============================================================================
// Recommendations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub workouts: Vec<String>,
    pub nutrition: Vec<String>,
    pub recovery: Vec<String>,
    pub goal_tips: Vec<String>,
}

/// All four recommendation groups from recent history
pub fn recommendations(
    recent_activities: &[ActivitySample],
    recent_meals: &[MealSample],
    active_goals: &[GoalProgress],
) -> Recommendations {
    Recommendations {
        workouts: recommend_workouts(recent_activities),
        nutrition: recommend_nutrition(recent_meals),
        recovery: recommend_recovery(recent_activities),
        goal_tips: recommend_goal_tips(active_goals),
    }
}

pub fn recommend_workouts(recent: &[ActivitySample]) -> Vec<String> {
    let mut tips = Vec::new();

    if recent.len() < 3 {
        tips.push("Start with 3 workouts per week to build consistency".to_string());
    }
    let has_type = |wanted: &str| recent.iter().any(|a| a.activity_type == wanted);
    if !has_type("strength") {
        tips.push("Add strength training to build muscle and boost metabolism".to_string());
    }
    if !has_type("cardio") {
        tips.push("Include cardio exercises for heart health and endurance".to_string());
    }

    if tips.is_empty() {
        tips.push("Great variety in your workouts! Keep challenging yourself".to_string());
    }
    tips
}

pub fn recommend_nutrition(recent: &[MealSample]) -> Vec<String> {
    let mut tips = Vec::new();

    if recent.len() < 5 {
        tips.push(
            "Track your meals consistently to better understand your nutrition patterns".to_string(),
        );
    } else if average_protein(recent) < 20.0 {
        tips.push("Consider increasing protein intake for muscle recovery and satiety".to_string());
    }

    if tips.is_empty() {
        tips.push("Your nutrition tracking looks good! Keep maintaining balanced meals".to_string());
    }
    tips
}

pub fn recommend_recovery(recent: &[ActivitySample]) -> Vec<String> {
    let high_intensity = recent
        .iter()
        .filter(|a| a.intensity.as_deref() == Some("high"))
        .count();

    let first = if high_intensity > 3 {
        "Make sure to include rest days for proper recovery"
    } else {
        "Balance high-intensity workouts with active recovery days"
    };
    vec![
        first.to_string(),
        "Get 7-9 hours of sleep for optimal recovery".to_string(),
    ]
}

pub fn recommend_goal_tips(goals: &[GoalProgress]) -> Vec<String> {
    if goals.is_empty() {
        return vec!["Set specific, measurable goals to track your progress effectively".to_string()];
    }

    goals
        .iter()
        .map(|goal| {
            let progress = goal.percent();
            if progress < 25.0 {
                format!("Focus on small daily actions for '{}' to build momentum", goal.title)
            } else if progress < 75.0 {
                format!("You're halfway to '{}'! Keep up the great work", goal.title)
            } else {
                format!("Almost there with '{}'! Give it your final push", goal.title)
            }
        })
        .collect()
}

fn average_protein(meals: &[MealSample]) -> f64 {
    if meals.is_empty() {
        return 0.0;
    }
    let total: f64 = meals.iter().map(|m| m.protein_g.unwrap_or(0.0)).sum();
    total / meals.len() as f64
}

// ============================================================================
// Pattern analysis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityTrends {
    Summary {
        total_workouts: usize,
        average_duration: f64,
        most_common_type: String,
        workout_distribution: BTreeMap<String, usize>,
    },
    NoData {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutritionTrends {
    Summary {
        average_daily_calories: f64,
        average_daily_protein: f64,
        total_meals_logged: usize,
    },
    NoData {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consistency {
    /// Share of days in the window with at least one activity, in percent
    pub score: f64,
    pub active_days: usize,
    pub total_days: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub activity_trends: ActivityTrends,
    pub nutrition_trends: NutritionTrends,
    pub consistency: Consistency,
    pub insights: Vec<String>,
}

/// Analyze the last [`PATTERN_WINDOW_DAYS`] of activities and meals
pub fn analyze_patterns(activities: &[ActivitySample], meals: &[MealSample]) -> PatternAnalysis {
    PatternAnalysis {
        activity_trends: activity_trends(activities),
        nutrition_trends: nutrition_trends(meals),
        consistency: consistency(activities),
        insights: pattern_insights(activities.len(), meals.len()),
    }
}

pub fn activity_trends(activities: &[ActivitySample]) -> ActivityTrends {
    if activities.is_empty() {
        return ActivityTrends::NoData {
            message: NOT_ENOUGH_DATA.to_string(),
        };
    }

    // First-seen order decides ties for the most common type
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for activity in activities {
        match counts.iter_mut().find(|(t, _)| *t == activity.activity_type) {
            Some((_, n)) => *n += 1,
            None => counts.push((activity.activity_type.as_str(), 1)),
        }
    }
    let most_common_type = counts
        .iter()
        .fold(None::<(&str, usize)>, |best, &(t, n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((t, n)),
        })
        .map(|(t, _)| t.to_string())
        .unwrap_or_else(|| "none".to_string());

    let total_duration: i64 = activities
        .iter()
        .map(|a| i64::from(a.duration_minutes.unwrap_or(0)))
        .sum();

    ActivityTrends::Summary {
        total_workouts: activities.len(),
        average_duration: round_tenth(total_duration as f64 / activities.len() as f64),
        most_common_type,
        workout_distribution: counts
            .into_iter()
            .map(|(t, n)| (t.to_string(), n))
            .collect(),
    }
}

pub fn nutrition_trends(meals: &[MealSample]) -> NutritionTrends {
    if meals.is_empty() {
        return NutritionTrends::NoData {
            message: NOT_ENOUGH_DATA.to_string(),
        };
    }

    let total_calories: i64 = meals.iter().map(|m| m.calories).sum();
    NutritionTrends::Summary {
        average_daily_calories: round_tenth(total_calories as f64 / meals.len() as f64),
        average_daily_protein: round_tenth(average_protein(meals)),
        total_meals_logged: meals.len(),
    }
}

pub fn consistency(activities: &[ActivitySample]) -> Consistency {
    let total_days = PATTERN_WINDOW_DAYS;
    if activities.is_empty() {
        return Consistency {
            score: 0.0,
            active_days: 0,
            total_days,
            message: "Start logging activities to track consistency".to_string(),
        };
    }

    let active_days = activities.iter().map(|a| a.day).collect::<HashSet<_>>().len();
    let score = active_days as f64 / f64::from(total_days) * 100.0;
    let message = if score >= 70.0 {
        "Excellent consistency! You're building great habits"
    } else if score >= 40.0 {
        "Good consistency. Try to increase frequency for better results"
    } else {
        "Focus on building a more consistent routine"
    };

    Consistency {
        score: round_tenth(score),
        active_days,
        total_days,
        message: message.to_string(),
    }
}

pub fn pattern_insights(workouts: usize, meals: usize) -> Vec<String> {
    let mut insights = Vec::new();

    if workouts > 0 {
        insights.push(format!("You've completed {workouts} workouts in the past 30 days"));
    }
    if meals > 0 {
        insights.push(format!("You've logged {meals} meals, showing commitment to tracking"));
    }

    if workouts >= 12 {
        insights.push("Your workout frequency is excellent! Aim to maintain this momentum".to_string());
    } else if workouts >= 8 {
        insights.push("You're working out consistently. Try to add one more session per week".to_string());
    } else if workouts > 0 {
        insights.push("Build towards 3-4 workouts per week for optimal results".to_string());
    }

    if insights.is_empty() {
        insights.push(
            "Start tracking your activities and nutrition to get personalized insights".to_string(),
        );
    }
    insights
}

// ============================================================================
// Motivation
// ============================================================================

/// Workouts among the recent entries that count as a streak
pub const STREAK_WORKOUTS: usize = 3;

/// Candidate motivational messages; the caller picks one
pub fn motivational_messages(name: &str, recent_workouts: usize) -> Vec<String> {
    if recent_workouts >= STREAK_WORKOUTS {
        vec![
            format!("Great consistency, {name}! You're building amazing habits!"),
            "Keep up the fantastic work! Your dedication is paying off!".to_string(),
            format!("You're on fire! {recent_workouts} workouts completed recently!"),
            format!("Amazing progress, {name}! Keep pushing forward!"),
        ]
    } else {
        vec![
            format!("Every journey begins with a single step. You've got this, {name}!"),
            "Today is a great day to work towards your goals!".to_string(),
            "Small steps lead to big changes. Let's get moving!".to_string(),
            "You're stronger than you think. Time to prove it!".to_string(),
        ]
    }
}
