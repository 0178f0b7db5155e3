//! Prediction pipeline
//!
//! validate → classify (encode inside) → catalog lookup.
//! The HTTP layer calls only this module.

use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog;
use super::classifier::{classify_with_params, risk_score};
use super::error::ClusterResult;
use super::layout::FEATURE_COUNT;
use super::params::PreprocessingParameters;
use super::types::{Cluster, HealthInput};
use super::validate::validate;

/// Prediction as returned to API clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutcome {
    pub predicted_cluster: usize,
    pub cluster_name: String,
    pub cluster_description: String,
    pub confidence: f64,
    pub probabilities: [f64; Cluster::COUNT],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u32>,
    pub input_processed: Vec<f64>,
}

/// Static description of the classifier for clients
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub status: &'static str,
    pub message: &'static str,
    pub valid_genders: Vec<String>,
    pub valid_smoking_history: Vec<String>,
    pub required_features: Vec<String>,
    pub clusters: BTreeMap<usize, &'static str>,
    pub preprocessing_features: usize,
    pub layout_hash: String,
}

/// Run the full pipeline for one record
pub fn predict(
    input: &HealthInput,
    params: &PreprocessingParameters,
) -> ClusterResult<PredictionOutcome> {
    validate(input, params)?;

    let result = classify_with_params(input, params)?;
    let descriptor = catalog::descriptor(result.cluster.index())?;
    let risk = risk_score(input);

    tracing::debug!(features = ?result.features.to_log_entry(params), "Encoded input");
    tracing::info!(
        "Predicted cluster {} ({}) with confidence {:.3}, risk score {}",
        descriptor.index,
        descriptor.name,
        result.confidence,
        risk
    );

    Ok(PredictionOutcome {
        predicted_cluster: descriptor.index,
        cluster_name: descriptor.name.to_string(),
        cluster_description: descriptor.description.to_string(),
        confidence: result.confidence,
        probabilities: result.probabilities,
        risk_score: Some(risk),
        input_processed: result.features.as_slice().to_vec(),
    })
}

pub fn model_info(params: &PreprocessingParameters) -> ModelInfo {
    let required_features = params
        .numeric_features
        .iter()
        .cloned()
        .chain(["gender", "smoking_history"].map(String::from))
        .collect();

    ModelInfo {
        status: "rule_based",
        message: "Using rule-based cluster assignment",
        valid_genders: params.gender_classes.to_vec(),
        valid_smoking_history: params.smoking_categories.to_vec(),
        required_features,
        clusters: catalog::all().iter().map(|d| (d.index, d.name)).collect(),
        preprocessing_features: FEATURE_COUNT,
        layout_hash: format!("{:08x}", params.layout_hash()),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::error::ClusterError;

    fn params() -> PreprocessingParameters {
        PreprocessingParameters::fallback()
    }

    #[test]
    fn test_predict_scenarios_round_trip_through_catalog() {
        let cases = [
            (HealthInput::new(10.0, false, false, 18.0, 5.0, 90.0, "Male", "never"), 2),
            (HealthInput::new(65.0, true, false, 30.0, 7.0, 160.0, "Female", "former"), 0),
            (HealthInput::new(35.0, false, false, 23.0, 5.9, 95.0, "Male", "current"), 3),
            (HealthInput::new(40.0, false, false, 24.0, 5.0, 100.0, "Female", "never"), 1),
        ];

        for (input, expected) in cases {
            let outcome = predict(&input, &params()).unwrap();
            assert_eq!(outcome.predicted_cluster, expected);
            assert_eq!(outcome.cluster_name, CLUSTER_NAMES[expected]);
            assert!(!outcome.cluster_description.is_empty());
            assert_eq!(outcome.probabilities[expected], outcome.confidence);
            assert_eq!(outcome.input_processed.len(), FEATURE_COUNT);
        }
    }

    const CLUSTER_NAMES: [&str; 4] = [
        "Elderly High Risk",
        "Healthy Low-Risk Adult",
        "Healthy Child/Adolescent",
        "Young Adult High Glucose Risk",
    ];

    #[test]
    fn test_predict_rejects_invalid_input() {
        let mut input = HealthInput::new(40.0, false, false, 24.0, 5.0, 100.0, "Other", "never");
        let err = predict(&input, &params()).unwrap_err();
        assert_eq!(err.field(), Some("gender"));

        input.gender = None;
        let err = predict(&input, &params()).unwrap_err();
        assert_eq!(err.field(), Some("gender"));
        assert!(err.to_string().starts_with("Missing required field"));
    }

    #[test]
    fn test_predict_surfaces_config_error() {
        let mut params = params();
        params.scaler_scale[0] = 0.0;
        let input = HealthInput::new(40.0, false, false, 24.0, 5.0, 100.0, "Female", "never");

        assert!(matches!(predict(&input, &params), Err(ClusterError::Config(_))));
    }

    #[test]
    fn test_outcome_serialization() {
        let input = HealthInput::new(65.0, true, false, 30.0, 7.0, 160.0, "Female", "former");
        let json = serde_json::to_value(predict(&input, &params()).unwrap()).unwrap();

        assert_eq!(json["predicted_cluster"], 0);
        assert_eq!(json["cluster_name"], "Elderly High Risk");
        assert_eq!(json["confidence"], 0.9);
        assert_eq!(json["risk_score"], 7);
        assert_eq!(json["probabilities"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_model_info() {
        let info = model_info(&params());
        assert_eq!(info.valid_genders, vec!["Female", "Male"]);
        assert_eq!(info.valid_smoking_history.len(), 6);
        assert_eq!(info.required_features.len(), 8);
        assert_eq!(info.required_features[4], "HbA1c_level");
        assert_eq!(info.required_features[7], "smoking_history");
        assert_eq!(info.clusters[&2], "Healthy Child/Adolescent");
        assert_eq!(info.preprocessing_features, 13);
    }
}
