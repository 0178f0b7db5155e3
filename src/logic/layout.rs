//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the encoded vector schema**
//!
//! ```text
//! [0..6)   scaled numerics, in `numeric_features` order
//! [6]      gender label code
//! [7..13)  smoking_history one-hot, in `smoking_categories` order
//! ```
//!
//! The layout hash covers every vocabulary that decides a slot, so two
//! parameter documents that order things differently never hash alike.

use crc32fast::Hasher;

use super::params::PreprocessingParameters;

// ============================================================================
// SIZES
// ============================================================================

/// Scaled numeric slots
pub const NUMERIC_FEATURE_COUNT: usize = 6;

/// Label-encoder vocabulary size
pub const GENDER_CLASS_COUNT: usize = 2;

/// One-hot slots for smoking_history
pub const SMOKING_CATEGORY_COUNT: usize = 6;

/// Total encoded features
/// IMPORTANT: Must stay NUMERIC + 1 + SMOKING!
pub const FEATURE_COUNT: usize = NUMERIC_FEATURE_COUNT + 1 + SMOKING_CATEGORY_COUNT;

/// Index of the gender code
pub const GENDER_SLOT: usize = NUMERIC_FEATURE_COUNT;

/// First one-hot smoking slot
pub const SMOKING_OFFSET: usize = NUMERIC_FEATURE_COUNT + 1;

// ============================================================================
// INPUT FIELDS
// ============================================================================

/// Numeric input fields, in validation order
pub const NUMERIC_FIELDS: [&str; NUMERIC_FEATURE_COUNT] = [
    "age",
    "hypertension",
    "heart_disease",
    "bmi",
    "hba1c_level",
    "blood_glucose_level",
];

/// Every field a record must carry, in validation order
pub const REQUIRED_FIELDS: [&str; 8] = [
    "age",
    "hypertension",
    "heart_disease",
    "bmi",
    "hba1c_level",
    "blood_glucose_level",
    "gender",
    "smoking_history",
];

/// Logical feature names whose input field is spelled differently
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("HbA1c_level", "hba1c_level"),
    ("blood_glucose_level", "blood_glucose_level"),
];

/// Resolve a logical feature name to the input field that carries it
pub fn input_field_for(feature: &str) -> Option<&'static str> {
    let field = FIELD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == feature)
        .map(|(_, field)| *field)
        .unwrap_or(feature);

    NUMERIC_FIELDS.iter().copied().find(|&f| f == field)
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 of the vocabularies that decide slot positions
pub fn compute_layout_hash(params: &PreprocessingParameters) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_COUNT as u8]);

    let names = params
        .numeric_features
        .iter()
        .chain(params.gender_classes.iter())
        .chain(params.smoking_categories.iter());

    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

/// Slot names, e.g. `bmi`, `gender`, `smoking_history=never`
pub fn feature_names(params: &PreprocessingParameters) -> Vec<String> {
    let mut names: Vec<String> = params.numeric_features.to_vec();
    names.push("gender".to_string());
    names.extend(
        params
            .smoking_categories
            .iter()
            .map(|category| format!("smoking_history={}", category)),
    );
    names
}

// ============================================================================
// TESTS
// ============================================================================
