//! User biometrics and the lookup tables used to interpret them
//!
//! [`UserBiometrics`] mirrors the nullable columns of a user record. A single
//! validation pass turns it into [`CompleteBiometrics`] or reports every
//! missing field at once through [`IncompleteBiometrics`].

use crate::errors::IncompleteBiometrics;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Gender
// ============================================================================

/// Gender as used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    /// Any other or blank value; uses the midpoint constant
    Unspecified,
}

impl Gender {
    /// Resolve a free-form gender string, case-insensitively
    ///
    /// Anything other than "male" or "female" maps to `Unspecified`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unspecified,
        }
    }

    /// Sex-specific constant added to the Mifflin-St Jeor base
    pub fn bmr_offset(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
            Gender::Unspecified => -78.0,
        }
    }
}

// ============================================================================
// Activity level
// ============================================================================

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise plus a physical job
    ExtraActive,
}

/// One row of the activity table
struct ActivityEntry {
    level: ActivityLevel,
    key: &'static str,
    multiplier: f64,
    description: &'static str,
}

static ACTIVITY_TABLE: [ActivityEntry; 5] = [
    ActivityEntry {
        level: ActivityLevel::Sedentary,
        key: "sedentary",
        multiplier: 1.2,
        description: "little or no exercise",
    },
    ActivityEntry {
        level: ActivityLevel::LightlyActive,
        key: "lightly_active",
        multiplier: 1.375,
        description: "light exercise 1-3 days/week",
    },
    ActivityEntry {
        level: ActivityLevel::ModeratelyActive,
        key: "moderately_active",
        multiplier: 1.55,
        description: "moderate exercise 3-5 days/week",
    },
    ActivityEntry {
        level: ActivityLevel::VeryActive,
        key: "very_active",
        multiplier: 1.725,
        description: "hard exercise 6-7 days/week",
    },
    ActivityEntry {
        level: ActivityLevel::ExtraActive,
        key: "extra_active",
        multiplier: 1.9,
        description: "very hard exercise + physical job",
    },
];

/// Multiplier applied when the stored activity level is not in the table
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.2;

/// Description used when the stored activity level is not in the table
pub const UNKNOWN_ACTIVITY_DESCRIPTION: &str = "your activity level";

impl ActivityLevel {
    /// All levels, least to most active
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    fn entry(&self) -> &'static ActivityEntry {
        // The table holds exactly one row per variant
        ACTIVITY_TABLE
            .iter()
            .find(|e| e.level == *self)
            .unwrap_or(&ACTIVITY_TABLE[0])
    }

    /// Look up a stored key such as `"moderately_active"`
    ///
    /// Keys are matched exactly, the way they are stored.
    pub fn from_key(key: &str) -> Option<Self> {
        ACTIVITY_TABLE.iter().find(|e| e.key == key).map(|e| e.level)
    }

    /// Storage key for this level
    pub fn key(&self) -> &'static str {
        self.entry().key
    }

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        self.entry().multiplier
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        self.entry().description
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Biometrics
// ============================================================================

/// Biometric fields required for a BMR calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiometricField {
    WeightLbs,
    HeightFeet,
    HeightInches,
    Age,
    Gender,
}

impl BiometricField {
    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            BiometricField::WeightLbs => "weight",
            BiometricField::HeightFeet => "height (feet)",
            BiometricField::HeightInches => "height (inches)",
            BiometricField::Age => "age",
            BiometricField::Gender => "gender",
        }
    }
}

impl fmt::Display for BiometricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw biometrics as stored on the user profile
///
/// Every field is optional. The calculator never mutates this record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserBiometrics {
    #[serde(default)]
    pub weight_lbs: Option<f64>,
    #[serde(default)]
    pub height_feet: Option<i32>,
    #[serde(default)]
    pub height_inches: Option<i32>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub activity_level: Option<String>,
    /// Signed lbs/week: negative = loss, positive = gain
    #[serde(default)]
    pub weight_goal_rate: Option<f64>,
    #[serde(default)]
    pub target_weight_lbs: Option<f64>,
}

/// Biometrics with every BMR input present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompleteBiometrics {
    pub weight_lbs: f64,
    pub height_feet: i32,
    pub height_inches: i32,
    pub age: i32,
    pub gender: Gender,
}

impl UserBiometrics {
    /// Check presence of all BMR inputs in one pass
    ///
    /// Presence is all that matters: `height_inches = 0` and an empty gender
    /// string both count as provided.
    pub fn validate(&self) -> Result<CompleteBiometrics, IncompleteBiometrics> {
        let mut missing = Vec::new();
        if self.weight_lbs.is_none() {
            missing.push(BiometricField::WeightLbs);
        }
        if self.height_feet.is_none() {
            missing.push(BiometricField::HeightFeet);
        }
        if self.height_inches.is_none() {
            missing.push(BiometricField::HeightInches);
        }
        if self.age.is_none() {
            missing.push(BiometricField::Age);
        }
        if self.gender.is_none() {
            missing.push(BiometricField::Gender);
        }

        match (
            self.weight_lbs,
            self.height_feet,
            self.height_inches,
            self.age,
            self.gender.as_deref(),
        ) {
            (Some(weight_lbs), Some(height_feet), Some(height_inches), Some(age), Some(gender)) => {
                Ok(CompleteBiometrics {
                    weight_lbs,
                    height_feet,
                    height_inches,
                    age,
                    gender: Gender::from_label(gender),
                })
            }
            _ => Err(IncompleteBiometrics { missing }),
        }
    }

    /// Activity level string, if set and non-empty
    pub fn activity_key(&self) -> Option<&str> {
        self.activity_level.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn complete() -> UserBiometrics {
        UserBiometrics {
            weight_lbs: Some(160.0),
            height_feet: Some(5),
            height_inches: Some(7),
            age: Some(30),
            gender: Some("male".to_string()),
            ..Default::default()
        }
    }

    #[rstest]
    #[case("male", Gender::Male)]
    #[case("MALE", Gender::Male)]
    #[case(" Female ", Gender::Female)]
    #[case("female", Gender::Female)]
    #[case("", Gender::Unspecified)]
    #[case("non-binary", Gender::Unspecified)]
    fn test_gender_from_label(#[case] label: &str, #[case] expected: Gender) {
        assert_eq!(Gender::from_label(label), expected);
    }

    #[rstest]
    #[case("sedentary", 1.2)]
    #[case("lightly_active", 1.375)]
    #[case("moderately_active", 1.55)]
    #[case("very_active", 1.725)]
    #[case("extra_active", 1.9)]
    fn test_activity_table(#[case] key: &str, #[case] multiplier: f64) {
        let level = ActivityLevel::from_key(key).unwrap();
        assert_eq!(level.multiplier(), multiplier);
        assert_eq!(level.key(), key);
    }

    #[test]
    fn test_unknown_activity_key() {
        assert_eq!(ActivityLevel::from_key("couch_potato"), None);
        assert_eq!(ActivityLevel::from_key("Sedentary"), None);
    }

    #[test]
    fn test_activity_multipliers_increase() {
        let multipliers: Vec<f64> = ActivityLevel::ALL.iter().map(|l| l.multiplier()).collect();
        assert!(multipliers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_validate_complete() {
        let bio = complete().validate().unwrap();
        assert_eq!(bio.gender, Gender::Male);
        assert_eq!(bio.height_inches, 7);
    }

    #[test]
    fn test_validate_zero_inches_is_present() {
        let mut bio = complete();
        bio.height_inches = Some(0);
        assert!(bio.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let err = UserBiometrics::default().validate().unwrap_err();
        assert_eq!(
            err.missing,
            vec![
                BiometricField::WeightLbs,
                BiometricField::HeightFeet,
                BiometricField::HeightInches,
                BiometricField::Age,
                BiometricField::Gender,
            ]
        );
    }

    #[test]
    fn test_validate_single_missing_field() {
        let mut bio = complete();
        bio.age = None;
        let err = bio.validate().unwrap_err();
        assert_eq!(err.missing, vec![BiometricField::Age]);
    }

    #[test]
    fn test_activity_key_ignores_empty() {
        let mut bio = complete();
        assert_eq!(bio.activity_key(), None);
        bio.activity_level = Some(String::new());
        assert_eq!(bio.activity_key(), None);
        bio.activity_level = Some("very_active".to_string());
        assert_eq!(bio.activity_key(), Some("very_active"));
    }

    #[test]
    fn test_deserialize_partial_record() {
        let bio: UserBiometrics = serde_json::from_str(r#"{"weight_lbs": 150.5, "gender": null}"#).unwrap();
        assert_eq!(bio.weight_lbs, Some(150.5));
        assert_eq!(bio.gender, None);
        assert_eq!(bio.age, None);
    }
}
