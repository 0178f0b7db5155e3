//! Cluster Assignment Rules & Thresholds
//!
//! Constants only. The classifier reads them; nothing here changes at runtime.

// ============================================================================
// RULE 1 - CHILD / ADOLESCENT
// ============================================================================

/// Below this age (with healthy BMI) = Healthy Child/Adolescent
pub const CHILD_MAX_AGE: f64 = 18.0;

pub const CHILD_MAX_BMI: f64 = 25.0;

// ============================================================================
// RULE 2 - ELDERLY HIGH RISK
// ============================================================================

pub const ELDERLY_MIN_AGE: f64 = 50.0;

pub const ELDERLY_BMI_MIN: f64 = 28.0;

pub const ELDERLY_HBA1C_MIN: f64 = 6.0;

pub const ELDERLY_GLUCOSE_MIN: f64 = 150.0;

// ============================================================================
// RULE 3 - YOUNG ADULT HIGH GLUCOSE
// ============================================================================

/// Inclusive age band
pub const YOUNG_ADULT_AGE: (f64, f64) = (25.0, 45.0);

/// Pre-diabetic HbA1c
pub const YOUNG_ADULT_HBA1C_MIN: f64 = 5.7;

pub const YOUNG_ADULT_GLUCOSE_MIN: f64 = 140.0;

pub const RISKY_SMOKING: [&str; 2] = ["current", "ever"];

// ============================================================================
// RULE 4 - HEALTHY ADULT
// ============================================================================

/// Half-open age band [18, 60)
pub const HEALTHY_ADULT_AGE: (f64, f64) = (18.0, 60.0);

/// Half-open BMI band [20, 30)
pub const HEALTHY_ADULT_BMI: (f64, f64) = (20.0, 30.0);

pub const HEALTHY_HBA1C_MAX: f64 = 5.7;

pub const HEALTHY_GLUCOSE_MAX: f64 = 126.0;

// ============================================================================
// RULE 5 - AGE FALLBACK
// ============================================================================

pub const FALLBACK_YOUTH_MAX_AGE: f64 = 25.0;

pub const FALLBACK_ELDERLY_MIN_AGE: f64 = 60.0;

// ============================================================================
// CONFIDENCE
// ============================================================================

/// Confidence with no supporting factor
pub const BASE_CONFIDENCE: f64 = 0.5;

/// Confidence ceiling
pub const MAX_CONFIDENCE: f64 = 0.9;

pub const ELDERLY_STEP: f64 = 0.10;
/// Factor: age at or above this
pub const ELDERLY_FACTOR_AGE: f64 = 60.0;

pub const HEALTHY_ADULT_STEP: f64 = 0.08;
/// Factor: inclusive age band
pub const HEALTHY_ADULT_FACTOR_AGE: (f64, f64) = (30.0, 55.0);
/// Factor: half-open BMI band
pub const HEALTHY_ADULT_FACTOR_BMI: (f64, f64) = (20.0, 28.0);

pub const YOUTH_STEP: f64 = 0.10;
/// Weight of the age<18 factor
pub const YOUTH_AGE_WEIGHT: u32 = 2;

pub const YOUNG_ADULT_STEP: f64 = 0.12;
/// Factor: inclusive age band
pub const YOUNG_ADULT_FACTOR_AGE: (f64, f64) = (25.0, 40.0);

// ============================================================================
// DIAGNOSTIC RISK SCORE (not used for assignment)
// ============================================================================

pub const RISK_AGE_OVER: f64 = 45.0;
pub const RISK_BMI_OVER: f64 = 25.0;
pub const RISK_HBA1C_OVER: f64 = 6.5;
pub const RISK_GLUCOSE_OVER: f64 = 126.0;

pub const RISK_AGE_WEIGHT: u32 = 1;
pub const RISK_BMI_WEIGHT: u32 = 1;
pub const RISK_HBA1C_WEIGHT: u32 = 2;
pub const RISK_GLUCOSE_WEIGHT: u32 = 2;
pub const RISK_HYPERTENSION_WEIGHT: u32 = 1;
pub const RISK_HEART_DISEASE_WEIGHT: u32 = 2;
pub const RISK_SMOKING_WEIGHT: u32 = 1;
