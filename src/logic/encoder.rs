//! Feature Encoder
//!
//! Raw record → 13-slot vector: standard scaling for the numerics, label
//! encoding for gender, one-hot for smoking_history. Slot order is fixed by
//! `layout.rs`.
//!
//! The encoder assumes the validator already ran. Anything it cannot read
//! is encoded as 0 (numeric), index 0 (gender) or all zeros (smoking).

use serde::{Deserialize, Serialize};

use super::error::{ClusterError, ClusterResult};
use super::layout::{
    feature_names, input_field_for, FEATURE_COUNT, GENDER_SLOT, NUMERIC_FEATURE_COUNT,
    SMOKING_CATEGORY_COUNT, SMOKING_OFFSET,
};
use super::params::PreprocessingParameters;
use super::types::HealthInput;

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Encoded record, tagged with the layout it was built against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// CRC32 of the vocabularies used (see `layout::compute_layout_hash`)
    pub layout_hash: u32,
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn gender_code(&self) -> f64 {
        self.values[GENDER_SLOT]
    }

    /// One-hot smoking slots
    pub fn smoking(&self) -> &[f64] {
        &self.values[SMOKING_OFFSET..]
    }

    /// JSON form for logging, with slot names
    pub fn to_log_entry(&self, params: &PreprocessingParameters) -> serde_json::Value {
        serde_json::json!({
            "layout_hash": format!("{:08x}", self.layout_hash),
            "values": self.values,
            "named_values": feature_names(params)
                .into_iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name, serde_json::json!(value)))
                .collect::<serde_json::Map<_, _>>(),
        })
    }
}

// ============================================================================
// ENCODING STEPS
// ============================================================================

/// `(x - mean) / scale` per slot
pub fn standard_scale(
    values: &[f64; NUMERIC_FEATURE_COUNT],
    means: &[f64; NUMERIC_FEATURE_COUNT],
    scales: &[f64; NUMERIC_FEATURE_COUNT],
) -> ClusterResult<[f64; NUMERIC_FEATURE_COUNT]> {
    let mut scaled = [0.0; NUMERIC_FEATURE_COUNT];
    for i in 0..NUMERIC_FEATURE_COUNT {
        if scales[i] == 0.0 {
            return Err(ClusterError::Config(format!(
                "scaler.scale[{}] is zero",
                i
            )));
        }
        scaled[i] = (values[i] - means[i]) / scales[i];
    }
    Ok(scaled)
}

/// Position of `value` in `classes`, 0 when unknown
pub fn label_encode(value: &str, classes: &[String]) -> usize {
    classes.iter().position(|c| c == value).unwrap_or(0)
}

/// 1 at the matching category, 0 elsewhere; all zeros when unmatched
pub fn one_hot_encode(
    value: &str,
    categories: &[String; SMOKING_CATEGORY_COUNT],
) -> [f64; SMOKING_CATEGORY_COUNT] {
    let mut encoded = [0.0; SMOKING_CATEGORY_COUNT];
    for (slot, category) in encoded.iter_mut().zip(categories.iter()) {
        if category == value {
            *slot = 1.0;
        }
    }
    encoded
}

/// Raw numeric values in `numeric_features` order
fn numeric_values(
    input: &HealthInput,
    params: &PreprocessingParameters,
) -> [f64; NUMERIC_FEATURE_COUNT] {
    let mut raw = [0.0; NUMERIC_FEATURE_COUNT];
    for (slot, feature) in raw.iter_mut().zip(params.numeric_features.iter()) {
        *slot = input_field_for(feature)
            .map(|field| input.number_or_zero(field))
            .unwrap_or(0.0);
    }
    raw
}

// ============================================================================
// ENCODE
// ============================================================================

/// Encode a record into the 13-slot feature vector
pub fn encode(input: &HealthInput, params: &PreprocessingParameters) -> ClusterResult<FeatureVector> {
    let raw = numeric_values(input, params);
    let scaled = standard_scale(&raw, &params.scaler_mean, &params.scaler_scale)?;
    let gender = label_encode(input.gender(), &params.gender_classes);
    let smoking = one_hot_encode(input.smoking_history(), &params.smoking_categories);

    let mut values = [0.0; FEATURE_COUNT];
    values[..NUMERIC_FEATURE_COUNT].copy_from_slice(&scaled);
    values[GENDER_SLOT] = gender as f64;
    values[SMOKING_OFFSET..].copy_from_slice(&smoking);

    tracing::debug!("Processed features count: {}", values.len());

    Ok(FeatureVector {
        layout_hash: params.layout_hash(),
        values,
    })
}

// ============================================================================
// TESTS
// ============================================================================
