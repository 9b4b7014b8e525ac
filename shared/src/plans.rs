//! Template-based meal and workout plans
//!
//! Plans rotate through fixed template tables keyed by goal focus or fitness
//! level. No model call is involved, so plans are available offline.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Longest plan the API will generate
pub const MAX_PLAN_DAYS: u32 = 28;

/// Plan length used when the caller does not ask for one
pub const DEFAULT_PLAN_DAYS: u32 = 7;

// ============================================================================
// Meal plans
// ============================================================================

/// Dietary focus derived from the user's primary goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalFocus {
    WeightLoss,
    MuscleGain,
    General,
}

impl GoalFocus {
    /// Classify a free-text primary goal; missing goals are general fitness
    pub fn from_primary_goal(goal: Option<&str>) -> Self {
        let goal = goal.unwrap_or("general fitness").to_lowercase();
        if goal.contains("weight loss") || goal.contains("lose") {
            GoalFocus::WeightLoss
        } else if goal.contains("muscle") || goal.contains("gain") {
            GoalFocus::MuscleGain
        } else {
            GoalFocus::General
        }
    }

    fn templates(&self) -> &'static MealTemplates {
        match self {
            GoalFocus::WeightLoss => &WEIGHT_LOSS_MEALS,
            GoalFocus::MuscleGain => &MUSCLE_GAIN_MEALS,
            GoalFocus::General => &GENERAL_MEALS,
        }
    }
}

struct MealTemplates {
    breakfast: [&'static str; 3],
    lunch: [&'static str; 3],
    dinner: [&'static str; 3],
    snack: [&'static str; 3],
}

static WEIGHT_LOSS_MEALS: MealTemplates = MealTemplates {
    breakfast: [
        "Greek yogurt with berries and almonds",
        "Oatmeal with banana and peanut butter",
        "Egg white omelet with vegetables",
    ],
    lunch: [
        "Grilled chicken salad",
        "Quinoa bowl with vegetables",
        "Tuna wrap with mixed greens",
    ],
    dinner: [
        "Baked salmon with broccoli",
        "Lean turkey with sweet potato",
        "Grilled chicken with roasted vegetables",
    ],
    snack: [
        "Apple with almond butter",
        "Protein shake",
        "Carrot sticks with hummus",
    ],
};

static MUSCLE_GAIN_MEALS: MealTemplates = MealTemplates {
    breakfast: [
        "Protein pancakes with eggs",
        "Oatmeal with protein powder and banana",
        "Scrambled eggs with avocado toast",
    ],
    lunch: [
        "Chicken breast with brown rice",
        "Beef stir-fry with quinoa",
        "Salmon with sweet potato",
    ],
    dinner: [
        "Steak with vegetables and rice",
        "Chicken pasta with marinara",
        "Turkey meatballs with whole grain pasta",
    ],
    snack: [
        "Protein shake with banana",
        "Greek yogurt with granola",
        "Nuts and dried fruit",
    ],
};

static GENERAL_MEALS: MealTemplates = MealTemplates {
    breakfast: [
        "Smoothie bowl with fruits",
        "Whole grain toast with avocado",
        "Oatmeal with mixed berries",
    ],
    lunch: [
        "Mixed salad with grilled protein",
        "Whole grain wrap with vegetables",
        "Buddha bowl",
    ],
    dinner: [
        "Grilled fish with quinoa",
        "Chicken stir-fry with rice",
        "Vegetable curry with brown rice",
    ],
    snack: [
        "Fresh fruit",
        "Nuts and seeds",
        "Veggie sticks with dip",
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub snack: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanDay {
    pub day: u32,
    pub date: NaiveDate,
    pub meals: Meals,
}

/// Build a meal plan of `days` days starting on `start`
pub fn meal_plan(focus: GoalFocus, start: NaiveDate, days: u32) -> Vec<MealPlanDay> {
    let t = focus.templates();
    (0..days)
        .map(|i| {
            let slot = i as usize;
            MealPlanDay {
                day: i + 1,
                date: offset(start, i),
                meals: Meals {
                    breakfast: pick(&t.breakfast, slot),
                    lunch: pick(&t.lunch, slot),
                    dinner: pick(&t.dinner, slot),
                    snack: pick(&t.snack, slot),
                },
            }
        })
        .collect()
}

// ============================================================================
// Workout plans
// ============================================================================

/// Self-reported fitness level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    /// Parse a stored level; unknown or missing values are intermediate
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::to_lowercase).as_deref() {
            Some("beginner") => FitnessLevel::Beginner,
            Some("advanced") => FitnessLevel::Advanced,
            _ => FitnessLevel::Intermediate,
        }
    }

    fn rotation(&self) -> &'static [WorkoutTemplate; 7] {
        match self {
            FitnessLevel::Beginner => &BEGINNER_WORKOUTS,
            FitnessLevel::Intermediate => &INTERMEDIATE_WORKOUTS,
            FitnessLevel::Advanced => &ADVANCED_WORKOUTS,
        }
    }
}

struct WorkoutTemplate {
    workout_type: &'static str,
    activity: &'static str,
    intensity: &'static str,
}

const fn w(workout_type: &'static str, activity: &'static str, intensity: &'static str) -> WorkoutTemplate {
    WorkoutTemplate {
        workout_type,
        activity,
        intensity,
    }
}

static BEGINNER_WORKOUTS: [WorkoutTemplate; 7] = [
    w("cardio", "20 min brisk walk", "low"),
    w("strength", "Bodyweight exercises (squats, push-ups, planks)", "low"),
    w("rest", "Light stretching or yoga", "low"),
    w("cardio", "25 min cycling or swimming", "low"),
    w("strength", "Full body workout with light weights", "moderate"),
    w("cardio", "30 min walk or jog", "moderate"),
    w("rest", "Complete rest or gentle yoga", "low"),
];

static INTERMEDIATE_WORKOUTS: [WorkoutTemplate; 7] = [
    w("strength", "Upper body workout (chest, back, arms)", "moderate"),
    w("cardio", "30 min running or HIIT", "moderate"),
    w("strength", "Lower body workout (legs, glutes)", "moderate"),
    w("cardio", "45 min cycling or swimming", "moderate"),
    w("strength", "Full body circuit training", "high"),
    w("cardio", "40 min running intervals", "high"),
    w("active_recovery", "Yoga or light swimming", "low"),
];

static ADVANCED_WORKOUTS: [WorkoutTemplate; 7] = [
    w("strength", "Heavy upper body (bench, rows, overhead press)", "high"),
    w("hiit", "45 min HIIT session", "high"),
    w("strength", "Heavy lower body (squats, deadlifts, lunges)", "high"),
    w("cardio", "60 min endurance run or bike", "moderate"),
    w("strength", "Olympic lifts and core", "high"),
    w("hiit", "Sprint intervals or CrossFit style workout", "high"),
    w("active_recovery", "Yoga, foam rolling, and mobility", "low"),
];

const WORKOUT_DURATION: &str = "30-60 min";
const WORKOUT_NOTES: &str = "Adjust intensity based on how you feel. Stay hydrated!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlanDay {
    pub day: u32,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub activity: String,
    pub intensity: String,
    pub duration: String,
    pub notes: String,
}

/// Build a workout plan of `days` days starting on `start`
pub fn workout_plan(level: FitnessLevel, start: NaiveDate, days: u32) -> Vec<WorkoutPlanDay> {
    let rotation = level.rotation();
    (0..days)
        .map(|i| {
            let template = &rotation[i as usize % rotation.len()];
            WorkoutPlanDay {
                day: i + 1,
                date: offset(start, i),
                workout_type: template.workout_type.to_string(),
                activity: template.activity.to_string(),
                intensity: template.intensity.to_string(),
                duration: WORKOUT_DURATION.to_string(),
                notes: WORKOUT_NOTES.to_string(),
            }
        })
        .collect()
}

fn pick(options: &[&'static str], slot: usize) -> String {
    options[slot % options.len()].to_string()
}

fn offset(start: NaiveDate, days: u32) -> NaiveDate {
    start
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}
