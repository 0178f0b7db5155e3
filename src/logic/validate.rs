//! Input Validator
//!
//! Checked in order, first failure wins:
//! 1. every required field present
//! 2. gender in the label-encoder vocabulary
//! 3. smoking_history in the one-hot vocabulary
//! 4. numeric fields coercible to a finite number

use super::error::{ClusterError, ClusterResult};
use super::layout::{NUMERIC_FIELDS, REQUIRED_FIELDS};
use super::params::PreprocessingParameters;
use super::types::{FieldValue, HealthInput};

/// Reject a record that cannot be encoded faithfully
pub fn validate(input: &HealthInput, params: &PreprocessingParameters) -> ClusterResult<()> {
    if let Some(field) = REQUIRED_FIELDS.iter().find(|f| !input.has_field(f)) {
        return Err(ClusterError::validation(
            *field,
            format!("Missing required field: {}", field),
        ));
    }

    if !params.is_valid_gender(input.gender()) {
        return Err(ClusterError::validation(
            "gender",
            format!("Invalid gender. Must be one of: {}", params.gender_classes.join(", ")),
        ));
    }

    if !params.is_valid_smoking_history(input.smoking_history()) {
        return Err(ClusterError::validation(
            "smoking_history",
            format!(
                "Invalid smoking_history. Must be one of: {}",
                params.smoking_categories.join(", ")
            ),
        ));
    }

    for field in NUMERIC_FIELDS {
        let numeric = input.value(field).and_then(FieldValue::as_number);
        if numeric.is_none() {
            return Err(ClusterError::validation(
                field,
                format!("{} must be a valid number", field),
            ));
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
