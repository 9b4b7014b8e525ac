//! FitTrack Shared Library
//!
//! Calorie engine and shared types used by the backend and the WASM module.
//! Everything here is pure: no I/O, no clock reads.

pub mod balance;
pub mod biometrics;
pub mod calories;
pub mod coach;
pub mod errors;
pub mod insights;
pub mod plans;
pub mod types;
pub mod units;

// Re-export commonly used items
pub use balance::{
    compute_weekly_summary, daily_report, DailyBalance, DailyReport, DailyTotals, DaySums,
    WeeklySummary,
};
pub use biometrics::{ActivityLevel, BiometricField, Gender, UserBiometrics};
pub use calories::{
    calculate_bmr, calculate_full_profile, calculate_target_calories, calculate_tdee,
    CalorieExplanation, CalorieProfile,
};
pub use errors::IncompleteBiometrics;
pub use insights::{PatternAnalysis, Recommendations};
pub use types::*;
