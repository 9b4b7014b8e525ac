//! Calorie profile calculations
//!
//! Derives BMR, TDEE and a goal-adjusted daily calorie target from a user's
//! biometrics. Every function here is total: missing inputs produce absent
//! outputs and an explanation, never an error.
//!
//! Pipeline: biometrics → BMR (Mifflin-St Jeor) → TDEE (activity multiplier)
//! → target calories (weekly goal rate spread over the week, floored).

use crate::biometrics::{
    ActivityLevel, CompleteBiometrics, UserBiometrics, DEFAULT_ACTIVITY_MULTIPLIER,
    UNKNOWN_ACTIVITY_DESCRIPTION,
};
use crate::units::{
    daily_kcal_for_weekly_rate, feet_inches_to_cm, format_amount, lbs_to_kg, round_kcal,
    KCAL_PER_LB,
};
use serde::{Deserialize, Serialize};

/// Lowest daily target ever recommended, regardless of gender
///
/// Known limitation: clinical guidance uses 1200 for women and 1500 for men.
/// A single floor is applied until product decides otherwise.
pub const MIN_TARGET_CALORIES: f64 = 1200.0;

const BMR_DESCRIPTION: &str = "Basal Metabolic Rate - calories burned at rest";
const TDEE_DESCRIPTION: &str = "Total Daily Energy Expenditure - calories burned with activity";
const INCOMPLETE_PROFILE_DETAIL: &str =
    "Complete your profile (weight, height, age, gender) to see calorie calculations";
const MISSING_ACTIVITY_DETAIL: &str =
    "Set your activity level to calculate Total Daily Energy Expenditure";
const MAINTENANCE_DETAIL: &str = "No weight goal set - target is maintenance at TDEE";

/// Human-readable account of how a profile was derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieExplanation {
    pub bmr_description: String,
    pub tdee_description: String,
    pub target_description: Option<String>,
    pub calculation_details: Vec<String>,
}

impl Default for CalorieExplanation {
    fn default() -> Self {
        Self {
            bmr_description: BMR_DESCRIPTION.to_string(),
            tdee_description: TDEE_DESCRIPTION.to_string(),
            target_description: None,
            calculation_details: Vec::new(),
        }
    }
}

/// Calorie profile derived from current biometrics
///
/// Never persisted; recomputed on every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalorieProfile {
    pub bmr: Option<i64>,
    pub tdee: Option<i64>,
    pub target_calories: Option<i64>,
    /// target_calories - tdee; 0 under maintenance
    pub daily_deficit_surplus: i64,
    /// Weekly rate in lbs/week when a non-zero goal is set
    pub weekly_goal: Option<f64>,
    pub explanation: CalorieExplanation,
}

// ============================================================================
// BMR
// ============================================================================

/// Mifflin-St Jeor BMR for complete biometrics, rounded to whole calories
///
/// base = 10 × weight(kg) + 6.25 × height(cm) − 5 × age(y), then
/// +5 (male), −161 (female) or −78 (unspecified).
pub fn mifflin_st_jeor(bio: &CompleteBiometrics) -> i64 {
    let weight_kg = lbs_to_kg(bio.weight_lbs);
    let height_cm = feet_inches_to_cm(bio.height_feet, bio.height_inches);
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(bio.age);
    round_kcal(base + bio.gender.bmr_offset())
}

/// Calculate BMR, or `None` when any required biometric is missing
pub fn calculate_bmr(biometrics: &UserBiometrics) -> Option<i64> {
    biometrics.validate().ok().map(|bio| mifflin_st_jeor(&bio))
}

// ============================================================================
// TDEE
// ============================================================================

/// Activity multiplier for a stored key; unknown keys fall back to sedentary
pub fn activity_multiplier(activity_level: &str) -> f64 {
    ActivityLevel::from_key(activity_level)
        .map(|level| level.multiplier())
        .unwrap_or(DEFAULT_ACTIVITY_MULTIPLIER)
}

/// Calculate Total Daily Energy Expenditure
///
/// `None` when there is no usable BMR (absent or zero) or no activity level.
pub fn calculate_tdee(bmr: Option<i64>, activity_level: Option<&str>) -> Option<i64> {
    let bmr = bmr.filter(|b| *b != 0)?;
    let activity_level = activity_level.filter(|a| !a.is_empty())?;
    Some(round_kcal(bmr as f64 * activity_multiplier(activity_level)))
}

// ============================================================================
// Target calories
// ============================================================================

/// Calculate the daily calorie target for a weekly weight goal
///
/// A rate of zero is a valid maintenance signal and still runs through the
/// formula; only an absent rate (or an unusable TDEE) returns `tdee` as-is.
pub fn calculate_target_calories(tdee: Option<i64>, weight_goal_rate: Option<f64>) -> Option<i64> {
    match (tdee, weight_goal_rate) {
        (Some(t), Some(rate)) if t != 0 => {
            let target = t as f64 + daily_kcal_for_weekly_rate(rate);
            Some(round_kcal(target.max(MIN_TARGET_CALORIES)))
        }
        _ => tdee,
    }
}

// ============================================================================
// Full profile
// ============================================================================

/// Build the full calorie profile for a user
///
/// Short-circuits with an explanatory detail when the BMR or TDEE step lacks
/// data, so `calculation_details` is never empty.
pub fn calculate_full_profile(user: &UserBiometrics) -> CalorieProfile {
    let mut profile = CalorieProfile::default();
    let details = &mut profile.explanation.calculation_details;

    let Some(bmr) = calculate_bmr(user).filter(|b| *b != 0) else {
        details.push(INCOMPLETE_PROFILE_DETAIL.to_string());
        return profile;
    };
    profile.bmr = Some(bmr);
    details.push(format!(
        "Your BMR is {bmr} calories per day based on your age, gender, height, and weight"
    ));

    let activity_key = user.activity_key();
    let Some(tdee) = calculate_tdee(Some(bmr), activity_key) else {
        details.push(MISSING_ACTIVITY_DETAIL.to_string());
        return profile;
    };
    profile.tdee = Some(tdee);

    let activity_desc = activity_key
        .and_then(ActivityLevel::from_key)
        .map(|level| level.description())
        .unwrap_or(UNKNOWN_ACTIVITY_DESCRIPTION);
    details.push(format!("With {activity_desc}, your TDEE is {tdee} calories per day"));

    match user.weight_goal_rate.filter(|rate| *rate != 0.0) {
        Some(rate) => apply_weight_goal(&mut profile, tdee, rate),
        None => {
            profile.target_calories = Some(tdee);
            profile.explanation.target_description =
                Some(format!("To maintain weight, eat {tdee} calories/day"));
            profile
                .explanation
                .calculation_details
                .push(MAINTENANCE_DETAIL.to_string());
        }
    }

    profile
}

fn apply_weight_goal(profile: &mut CalorieProfile, tdee: i64, rate: f64) {
    let target = calculate_target_calories(Some(tdee), Some(rate)).unwrap_or(tdee);
    let adjustment = target.saturating_sub(tdee);

    profile.target_calories = Some(target);
    profile.daily_deficit_surplus = adjustment;
    profile.weekly_goal = Some(rate);

    let explanation = &mut profile.explanation;
    if rate < 0.0 {
        let abs_rate = format_amount(rate.abs());
        let weekly = format_amount(rate.abs() * KCAL_PER_LB);
        let deficit = adjustment.unsigned_abs();
        explanation.target_description = Some(format!(
            "To lose {abs_rate} lb/week, eat {target} calories/day ({deficit} calorie deficit)"
        ));
        explanation.calculation_details.push(format!(
            "Weight loss goal: {abs_rate} lb/week = {weekly} calories/week = {deficit} calorie deficit per day"
        ));
    } else {
        let shown_rate = format_amount(rate);
        let weekly = format_amount(rate * KCAL_PER_LB);
        explanation.target_description = Some(format!(
            "To gain {shown_rate} lb/week, eat {target} calories/day ({adjustment} calorie surplus)"
        ));
        explanation.calculation_details.push(format!(
            "Weight gain goal: {shown_rate} lb/week = {weekly} calories/week = {adjustment} calorie surplus per day"
        ));
    }
}
