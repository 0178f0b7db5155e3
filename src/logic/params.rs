//! Parameter Store
//!
//! Scaling constants and categorical vocabularies, loaded once per process.
//! A missing or broken parameter document never takes the classifier down:
//! the error is logged and the embedded defaults are installed instead.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::error::{ClusterError, ClusterResult};
use super::layout::{
    compute_layout_hash, input_field_for, GENDER_CLASS_COUNT, NUMERIC_FEATURE_COUNT,
    SMOKING_CATEGORY_COUNT,
};

/// Default location of the parameter document
pub const DEFAULT_PARAMS_PATH: &str = "config/preprocessing_params.json";

static PARAMETERS: OnceCell<PreprocessingParameters> = OnceCell::new();

// ============================================================================
// DOCUMENT (on-disk shape)
// ============================================================================

/// Parameter document as exported next to the training notebook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDocument {
    pub scaler: ScalerDocument,
    pub label_encoder: LabelEncoderDocument,
    pub onehot_encoder: OneHotEncoderDocument,
    pub numeric_features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerDocument {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoderDocument {
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoderDocument {
    /// One vocabulary per encoded column; only smoking_history is encoded
    pub categories: Vec<Vec<String>>,
}

// ============================================================================
// PARAMETERS (validated snapshot)
// ============================================================================

/// Immutable preprocessing snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreprocessingParameters {
    pub scaler_mean: [f64; NUMERIC_FEATURE_COUNT],
    pub scaler_scale: [f64; NUMERIC_FEATURE_COUNT],
    pub gender_classes: [String; GENDER_CLASS_COUNT],
    pub smoking_categories: [String; SMOKING_CATEGORY_COUNT],
    pub numeric_features: [String; NUMERIC_FEATURE_COUNT],
}

impl PreprocessingParameters {
    /// Embedded defaults, used when the document cannot be loaded
    pub fn fallback() -> Self {
        Self {
            scaler_mean: [54.47, 0.075, 0.04, 27.32, 5.53, 138.06],
            scaler_scale: [22.52, 0.26, 0.19, 6.95, 1.07, 40.71],
            gender_classes: ["Female", "Male"].map(String::from),
            smoking_categories: [
                "No Info",
                "current",
                "ever",
                "former",
                "never",
                "not current",
            ]
            .map(String::from),
            numeric_features: [
                "age",
                "hypertension",
                "heart_disease",
                "bmi",
                "HbA1c_level",
                "blood_glucose_level",
            ]
            .map(String::from),
        }
    }

    pub fn layout_hash(&self) -> u32 {
        compute_layout_hash(self)
    }

    pub fn is_valid_gender(&self, gender: &str) -> bool {
        self.gender_classes.iter().any(|g| g == gender)
    }

    pub fn is_valid_smoking_history(&self, smoking_history: &str) -> bool {
        self.smoking_categories.iter().any(|c| c == smoking_history)
    }

    /// Re-check the invariants a hand-built snapshot might break
    pub fn validate(&self) -> ClusterResult<()> {
        for (i, (mean, scale)) in self.scaler_mean.iter().zip(&self.scaler_scale).enumerate() {
            if !mean.is_finite() {
                return Err(ClusterError::Config(format!("scaler.mean[{}] is not finite", i)));
            }
            if !scale.is_finite() || *scale == 0.0 {
                return Err(ClusterError::Config(format!(
                    "scaler.scale[{}] must be finite and non-zero, got {}",
                    i, scale
                )));
            }
        }

        for feature in &self.numeric_features {
            if input_field_for(feature).is_none() {
                return Err(ClusterError::Config(format!(
                    "numeric_features: unknown feature '{}'",
                    feature
                )));
            }
        }

        let vocabularies = [
            ("label_encoder.classes", &self.gender_classes[..]),
            ("onehot_encoder.categories[0]", &self.smoking_categories[..]),
        ];
        for (key, vocabulary) in vocabularies {
            if vocabulary.iter().any(|entry| entry.is_empty()) {
                return Err(ClusterError::Config(format!("{}: empty category", key)));
            }
        }

        Ok(())
    }
}

impl Default for PreprocessingParameters {
    fn default() -> Self {
        Self::fallback()
    }
}

impl TryFrom<ParameterDocument> for PreprocessingParameters {
    type Error = ClusterError;

    fn try_from(doc: ParameterDocument) -> ClusterResult<Self> {
        let smoking = doc
            .onehot_encoder
            .categories
            .into_iter()
            .next()
            .ok_or_else(|| ClusterError::Config("onehot_encoder.categories is empty".to_string()))?;

        let params = Self {
            scaler_mean: fixed(doc.scaler.mean, "scaler.mean")?,
            scaler_scale: fixed(doc.scaler.scale, "scaler.scale")?,
            gender_classes: fixed(doc.label_encoder.classes, "label_encoder.classes")?,
            smoking_categories: fixed(smoking, "onehot_encoder.categories[0]")?,
            numeric_features: fixed(doc.numeric_features, "numeric_features")?,
        };
        params.validate()?;
        Ok(params)
    }
}

fn fixed<T, const N: usize>(values: Vec<T>, key: &str) -> ClusterResult<[T; N]> {
    let len = values.len();
    values.try_into().map_err(|_| {
        ClusterError::Config(format!("{}: expected {} entries, found {}", key, N, len))
    })
}

// ============================================================================
// LOADING
// ============================================================================

/// Parameter path from `PREPROCESSING_PARAMS_PATH`, or the default
pub fn default_params_path() -> PathBuf {
    env::var("PREPROCESSING_PARAMS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PARAMS_PATH))
}

/// Read and validate a parameter document
pub fn load_from_path(path: &Path) -> ClusterResult<PreprocessingParameters> {
    let data = fs::read(path).map_err(|e| {
        ClusterError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;

    let doc: ParameterDocument = serde_json::from_slice(&data).map_err(|e| {
        ClusterError::Config(format!("failed to parse {}: {}", path.display(), e))
    })?;

    PreprocessingParameters::try_from(doc)
}

/// Load from disk, installing the embedded defaults on any failure
pub fn load_or_fallback(path: &Path) -> PreprocessingParameters {
    match load_from_path(path) {
        Ok(params) => {
            tracing::info!(
                "Preprocessing parameters loaded from {} (layout {:08x})",
                path.display(),
                params.layout_hash()
            );
            params
        }
        Err(e) => {
            tracing::error!("Error loading preprocessing parameters: {}", e);
            tracing::warn!("Using embedded fallback preprocessing parameters");
            PreprocessingParameters::fallback()
        }
    }
}

/// Process-wide parameters, loaded on first use
pub fn load() -> &'static PreprocessingParameters {
    PARAMETERS.get_or_init(|| load_or_fallback(&default_params_path()))
}

/// Eager start-up load from an explicit path
///
/// Has no effect on the path if the parameters were already loaded.
pub fn init(path: &Path) -> &'static PreprocessingParameters {
    if let Some(params) = PARAMETERS.get() {
        tracing::debug!("Preprocessing parameters already loaded, ignoring {}", path.display());
        return params;
    }
    PARAMETERS.get_or_init(|| load_or_fallback(path))
}

// ============================================================================
// TESTS
// ============================================================================
