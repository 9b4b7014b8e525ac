//! FitTrack WASM Module
//!
//! Browser bindings for the calorie engine, so clients can preview a profile
//! while the user is still typing biometrics.

use fittrack_shared::calories;
use fittrack_shared::UserBiometrics;
use wasm_bindgen::prelude::*;

/// Compute a full calorie profile from a biometrics JSON object
///
/// Missing fields are fine and produce absent profile values; malformed JSON
/// is thrown as a JS exception.
#[wasm_bindgen]
pub fn calorie_profile_json(biometrics_json: &str) -> Result<String, JsError> {
    profile_json(biometrics_json).map_err(|e| JsError::new(&e.to_string()))
}

fn profile_json(biometrics_json: &str) -> Result<String, serde_json::Error> {
    let biometrics: UserBiometrics = serde_json::from_str(biometrics_json)?;
    serde_json::to_string(&calories::calculate_full_profile(&biometrics))
}

/// Mifflin-St Jeor BMR in kcal/day
#[wasm_bindgen]
pub fn bmr(
    weight_lbs: f64,
    height_feet: i32,
    height_inches: i32,
    age: i32,
    gender: &str,
) -> Option<f64> {
    let biometrics = UserBiometrics {
        weight_lbs: Some(weight_lbs),
        height_feet: Some(height_feet),
        height_inches: Some(height_inches),
        age: Some(age),
        gender: Some(gender.to_string()),
        ..Default::default()
    };
    calories::calculate_bmr(&biometrics).map(|v| v as f64)
}

/// TDEE for a BMR and activity key; unknown keys use the sedentary multiplier
///
/// `undefined` in, or a zero BMR, gives `undefined` out, so the result of
/// `bmr` can be chained straight in.
#[wasm_bindgen]
pub fn tdee(bmr: Option<f64>, activity_level: Option<String>) -> Option<f64> {
    calories::calculate_tdee(bmr.map(|b| b.round() as i64), activity_level.as_deref())
        .map(|v| v as f64)
}

/// Daily target for a TDEE and weekly rate in lb/week, floored at 1200
///
/// Without a rate the TDEE is passed through unchanged.
#[wasm_bindgen]
pub fn target_calories(tdee: Option<f64>, weight_goal_rate: Option<f64>) -> Option<f64> {
    calories::calculate_target_calories(tdee.map(|t| t.round() as i64), weight_goal_rate)
        .map(|v| v as f64)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_empty_object_yields_profile() {
        let Ok(json) = calorie_profile_json("{}") else {
            panic!("profile computation failed");
        };
        assert!(json.contains("\"bmr\":null"));
    }

    #[wasm_bindgen_test]
    fn test_malformed_json_throws() {
        assert!(calorie_profile_json("not json").is_err());
    }
}
