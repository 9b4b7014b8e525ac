//! Unit conversion and rounding helpers
//!
//! Biometrics arrive in imperial units (pounds, feet and inches) while the
//! energy equations work in SI. Conversions happen once, at the boundary of
//! the calculation, never inside business rules.

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Energy stored in one pound of body weight
pub const KCAL_PER_LB: f64 = 3500.0;

/// Days in a week, used to spread weekly weight goals over single days
pub const DAYS_PER_WEEK: f64 = 7.0;

/// Convert pounds to kilograms
pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs * KG_PER_LB
}

/// Convert a feet + inches height to centimeters
///
/// The two components are summed as inches before converting, so `5'7"`
/// and `0'67"` produce the same result. The sum is done in `f64` so any
/// pair of `i32` inputs converts without overflow.
pub fn feet_inches_to_cm(feet: i32, inches: i32) -> f64 {
    let total_inches = f64::from(feet) * INCHES_PER_FOOT + f64::from(inches);
    total_inches * CM_PER_INCH
}

/// Format a rate or calorie amount the way stored explanation text expects
///
/// Whole values keep one decimal place (`1.0`, `3500.0`); anything else is
/// printed with the shortest exact representation (`0.5`, `1.25`).
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Daily calorie adjustment for a weekly weight change rate (lbs/week)
pub fn daily_kcal_for_weekly_rate(lbs_per_week: f64) -> f64 {
    lbs_per_week * (KCAL_PER_LB / DAYS_PER_WEEK)
}

/// Round to the nearest whole calorie
///
/// Ties go to the even neighbour, so `2.5 -> 2` and `3.5 -> 4`. Stored
/// calorie targets were historically produced with this rule and the
/// dashboard must agree with them to the calorie.
pub fn round_kcal(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Round to one decimal place, ties to even
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lbs_to_kg() {
        assert!((lbs_to_kg(100.0) - 45.3592).abs() < 1e-9);
        assert_eq!(lbs_to_kg(0.0), 0.0);
    }

    #[test]
    fn test_feet_inches_to_cm() {
        assert!((feet_inches_to_cm(5, 7) - 170.18).abs() < 1e-9);
        assert!((feet_inches_to_cm(6, 0) - 182.88).abs() < 1e-9);
        assert_eq!(feet_inches_to_cm(5, 7), feet_inches_to_cm(0, 67));
    }

    #[test]
    fn test_feet_inches_to_cm_extreme_inputs() {
        let cm = feet_inches_to_cm(i32::MAX, i32::MAX);
        assert!(cm.is_finite());
        assert!(cm > 0.0);
        assert!(feet_inches_to_cm(i32::MIN, i32::MIN) < 0.0);
        assert!((feet_inches_to_cm(200_000_000, 0) - 200_000_000.0 * 12.0 * 2.54).abs() < 1.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1.0), "1.0");
        assert_eq!(format_amount(3500.0), "3500.0");
        assert_eq!(format_amount(0.5), "0.5");
        assert_eq!(format_amount(1750.0), "1750.0");
        assert_eq!(format_amount(1.25), "1.25");
    }

    #[test]
    fn test_daily_kcal_for_weekly_rate() {
        assert_eq!(daily_kcal_for_weekly_rate(1.0), 500.0);
        assert_eq!(daily_kcal_for_weekly_rate(-1.0), -500.0);
        assert_eq!(daily_kcal_for_weekly_rate(0.5), 250.0);
    }

    #[test]
    fn test_round_kcal_ties_to_even() {
        assert_eq!(round_kcal(2.5), 2);
        assert_eq!(round_kcal(3.5), 4);
        assert_eq!(round_kcal(-2.5), -2);
        assert_eq!(round_kcal(1644.37), 1644);
        assert_eq!(round_kcal(2090.4), 2090);
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(85.0), 85.0);
        assert_eq!(round_tenth(66.666_666), 66.7);
        assert_eq!(round_tenth(-12.34), -12.3);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: rounding never moves a value by more than half a calorie
        #[test]
        fn prop_round_kcal_within_half(value in -10_000.0f64..10_000.0) {
            let rounded = round_kcal(value) as f64;
            prop_assert!((rounded - value).abs() <= 0.5);
        }

        /// Property: extra inches always make someone taller
        #[test]
        fn prop_height_increases_with_inches(feet in 3i32..8, inches in 0i32..11) {
            prop_assert!(feet_inches_to_cm(feet, inches + 1) > feet_inches_to_cm(feet, inches));
        }

        /// Property: any pair of integer components converts to a finite height
        #[test]
        fn prop_height_total_over_i32(feet in any::<i32>(), inches in any::<i32>()) {
            prop_assert!(feet_inches_to_cm(feet, inches).is_finite());
        }
    }
}
