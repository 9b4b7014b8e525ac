//! Error types for the calorie engine

use crate::biometrics::BiometricField;
use thiserror::Error;

/// Biometrics are missing one or more BMR inputs
///
/// Never surfaced to callers as a failure: the calculator converts it into
/// absent profile fields plus an explanation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Incomplete biometrics: missing {}", join_labels(.missing))]
pub struct IncompleteBiometrics {
    pub missing: Vec<BiometricField>,
}

fn join_labels(fields: &[BiometricField]) -> String {
    fields
        .iter()
        .map(BiometricField::label)
        .collect::<Vec<_>>()
        .join(", ")
}
