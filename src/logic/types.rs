//! Cluster Types
//!
//! Input record, cluster identifiers and classification output.
//! No logic beyond field access and coercion.

use serde::{Deserialize, Serialize};

use super::encoder::FeatureVector;
use super::error::ClusterError;

// ============================================================================
// FIELD VALUE
// ============================================================================

/// Loosely typed record value
///
/// Records arrive from forms and stored rows, so a flag may be `true`, `1`
/// or `"1"` and a measurement may be a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric coercion; `None` when the value is not a finite number
    ///
    /// Booleans map to 1/0 and blank strings to 0.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            FieldValue::Number(n) => n.is_finite().then_some(*n),
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Some(0.0);
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
    }

    /// Truthiness of a flag field (non-zero)
    pub fn is_set(&self) -> bool {
        self.as_number().map(|n| n != 0.0).unwrap_or(false)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

// ============================================================================
// HEALTH INPUT
// ============================================================================

/// One health-measurement record
///
/// Extra keys (ids, timestamps, owner) are ignored on deserialize.
///
/// Ranges such as `age >= 0` or `bmi > 0` describe the expected data but are
/// not enforced. `validate` checks presence, vocabulary and numeric coercion
/// only; a negative age or zero bmi is encoded as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthInput {
    pub age: Option<FieldValue>,
    pub hypertension: Option<FieldValue>,
    pub heart_disease: Option<FieldValue>,
    pub bmi: Option<FieldValue>,
    pub hba1c_level: Option<FieldValue>,
    pub blood_glucose_level: Option<FieldValue>,
    pub gender: Option<String>,
    pub smoking_history: Option<String>,
}

impl HealthInput {
    /// Fully populated record
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        age: f64,
        hypertension: bool,
        heart_disease: bool,
        bmi: f64,
        hba1c_level: f64,
        blood_glucose_level: f64,
        gender: &str,
        smoking_history: &str,
    ) -> Self {
        Self {
            age: Some(age.into()),
            hypertension: Some(hypertension.into()),
            heart_disease: Some(heart_disease.into()),
            bmi: Some(bmi.into()),
            hba1c_level: Some(hba1c_level.into()),
            blood_glucose_level: Some(blood_glucose_level.into()),
            gender: Some(gender.to_string()),
            smoking_history: Some(smoking_history.to_string()),
        }
    }

    /// Numeric field by input name
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        match field {
            "age" => self.age.as_ref(),
            "hypertension" => self.hypertension.as_ref(),
            "heart_disease" => self.heart_disease.as_ref(),
            "bmi" => self.bmi.as_ref(),
            "hba1c_level" => self.hba1c_level.as_ref(),
            "blood_glucose_level" => self.blood_glucose_level.as_ref(),
            _ => None,
        }
    }

    /// Whether a required field is present (not null / absent)
    pub fn has_field(&self, field: &str) -> bool {
        match field {
            "gender" => self.gender.is_some(),
            "smoking_history" => self.smoking_history.is_some(),
            other => self.value(other).is_some(),
        }
    }

    /// Numeric value, 0 when missing or not a number
    pub fn number_or_zero(&self, field: &str) -> f64 {
        self.value(field).and_then(FieldValue::as_number).unwrap_or(0.0)
    }

    /// Flag value, false when missing
    pub fn flag(&self, field: &str) -> bool {
        self.value(field).map(FieldValue::is_set).unwrap_or(false)
    }

    pub fn gender(&self) -> &str {
        self.gender.as_deref().unwrap_or_default()
    }

    pub fn smoking_history(&self) -> &str {
        self.smoking_history.as_deref().unwrap_or_default()
    }
}

// ============================================================================
// CLUSTER
// ============================================================================

/// Fixed risk / demographic clusters
///
/// Serialized as the cluster index (0..=3), same as the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "usize", try_from = "usize")]
pub enum Cluster {
    ElderlyHighRisk,
    HealthyAdult,
    HealthyYouth,
    YoungAdultGlucoseRisk,
}

impl Cluster {
    pub const ALL: [Cluster; 4] = [
        Cluster::ElderlyHighRisk,
        Cluster::HealthyAdult,
        Cluster::HealthyYouth,
        Cluster::YoungAdultGlucoseRisk,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(&self) -> usize {
        match self {
            Cluster::ElderlyHighRisk => 0,
            Cluster::HealthyAdult => 1,
            Cluster::HealthyYouth => 2,
            Cluster::YoungAdultGlucoseRisk => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl From<Cluster> for usize {
    fn from(cluster: Cluster) -> Self {
        cluster.index()
    }
}

impl TryFrom<usize> for Cluster {
    type Error = ClusterError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Cluster::from_index(index).ok_or(ClusterError::NotFound { cluster: index })
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

/// Output of one classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub cluster: Cluster,
    /// Heuristic support for `cluster`, 0.5 ..= 0.9
    pub confidence: f64,
    /// Indexed by cluster; `probabilities[cluster] == confidence`
    pub probabilities: [f64; Cluster::COUNT],
    /// Encoded input, carried for debugging only
    pub features: FeatureVector,
}

// ============================================================================
// TESTS
// ============================================================================
