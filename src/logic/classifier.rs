//! Cluster Classifier
//!
//! Input: HealthInput (validated)
//! Output: ClassificationResult
//!
//! Ordered decision list, first matching rule wins. Confidence counts the
//! factors that support the chosen cluster. Deterministic; the encoded
//! feature vector is attached but never consulted.

use super::encoder::encode;
use super::error::ClusterResult;
use super::params::{self, PreprocessingParameters};
use super::rules::*;
use super::types::{ClassificationResult, Cluster, HealthInput};

// ============================================================================
// MEASUREMENTS
// ============================================================================

/// Typed view of the fields the rules read
#[derive(Debug, Clone, Copy)]
struct Measurements<'a> {
    age: f64,
    bmi: f64,
    hba1c: f64,
    glucose: f64,
    hypertension: bool,
    heart_disease: bool,
    smoking: &'a str,
}

impl<'a> Measurements<'a> {
    fn from_input(input: &'a HealthInput) -> Self {
        Self {
            age: input.number_or_zero("age"),
            bmi: input.number_or_zero("bmi"),
            hba1c: input.number_or_zero("hba1c_level"),
            glucose: input.number_or_zero("blood_glucose_level"),
            hypertension: input.flag("hypertension"),
            heart_disease: input.flag("heart_disease"),
            smoking: input.smoking_history(),
        }
    }
}

fn within(value: f64, (low, high): (f64, f64)) -> bool {
    value >= low && value <= high
}

fn within_half_open(value: f64, (low, high): (f64, f64)) -> bool {
    value >= low && value < high
}

// ============================================================================
// MAIN CLASSIFICATION FUNCTION
// ============================================================================

/// Classify against the process-wide parameters
pub fn classify(input: &HealthInput) -> ClusterResult<ClassificationResult> {
    classify_with_params(input, params::load())
}

/// Classify against an explicit parameter snapshot
pub fn classify_with_params(
    input: &HealthInput,
    params: &PreprocessingParameters,
) -> ClusterResult<ClassificationResult> {
    let features = encode(input, params)?;
    let m = Measurements::from_input(input);

    let cluster = assign_cluster(&m);
    let factors = supporting_factors(cluster, &m);
    let confidence = confidence_for(cluster, factors);
    let probabilities = probabilities_for(cluster, confidence);

    tracing::debug!(
        "Predicted cluster {} with confidence {:.3} ({} factors)",
        cluster,
        confidence,
        factors
    );

    Ok(ClassificationResult {
        cluster,
        confidence,
        probabilities,
        features,
    })
}

// ============================================================================
// ASSIGNMENT
// ============================================================================

fn assign_cluster(m: &Measurements) -> Cluster {
    // Rule 1: healthy child / adolescent
    if m.age < CHILD_MAX_AGE && m.bmi < CHILD_MAX_BMI {
        return Cluster::HealthyYouth;
    }

    // Rule 2: older with any major risk marker
    if m.age >= ELDERLY_MIN_AGE
        && (m.hypertension
            || m.heart_disease
            || m.bmi >= ELDERLY_BMI_MIN
            || m.hba1c >= ELDERLY_HBA1C_MIN
            || m.glucose >= ELDERLY_GLUCOSE_MIN)
    {
        return Cluster::ElderlyHighRisk;
    }

    // Rule 3: young adult with glycemic or smoking risk
    if within(m.age, YOUNG_ADULT_AGE)
        && (m.hba1c >= YOUNG_ADULT_HBA1C_MIN
            || m.glucose >= YOUNG_ADULT_GLUCOSE_MIN
            || RISKY_SMOKING.contains(&m.smoking))
    {
        return Cluster::YoungAdultGlucoseRisk;
    }

    // Rule 4: adult with every marker in range
    if within_half_open(m.age, HEALTHY_ADULT_AGE)
        && within_half_open(m.bmi, HEALTHY_ADULT_BMI)
        && m.hba1c < HEALTHY_HBA1C_MAX
        && m.glucose < HEALTHY_GLUCOSE_MAX
        && !m.hypertension
        && !m.heart_disease
    {
        return Cluster::HealthyAdult;
    }

    // Rule 5: age alone
    if m.age < FALLBACK_YOUTH_MAX_AGE {
        Cluster::HealthyYouth
    } else if m.age >= FALLBACK_ELDERLY_MIN_AGE {
        Cluster::ElderlyHighRisk
    } else {
        Cluster::HealthyAdult
    }
}

// ============================================================================
// CONFIDENCE
// ============================================================================

fn count(conditions: &[bool]) -> u32 {
    conditions.iter().filter(|&&c| c).count() as u32
}

fn supporting_factors(cluster: Cluster, m: &Measurements) -> u32 {
    match cluster {
        Cluster::ElderlyHighRisk => count(&[
            m.age >= ELDERLY_FACTOR_AGE,
            m.hypertension,
            m.heart_disease,
            m.bmi >= ELDERLY_BMI_MIN,
            m.hba1c >= ELDERLY_HBA1C_MIN,
            m.glucose >= ELDERLY_GLUCOSE_MIN,
        ]),
        Cluster::HealthyAdult => count(&[
            within(m.age, HEALTHY_ADULT_FACTOR_AGE),
            within_half_open(m.bmi, HEALTHY_ADULT_FACTOR_BMI),
            m.hba1c < HEALTHY_HBA1C_MAX,
            m.glucose < HEALTHY_GLUCOSE_MAX,
            !m.hypertension,
            !m.heart_disease,
        ]),
        Cluster::HealthyYouth => {
            let age = if m.age < CHILD_MAX_AGE { YOUTH_AGE_WEIGHT } else { 0 };
            age + count(&[m.bmi < CHILD_MAX_BMI, !m.hypertension, !m.heart_disease])
        }
        Cluster::YoungAdultGlucoseRisk => count(&[
            within(m.age, YOUNG_ADULT_FACTOR_AGE),
            m.hba1c >= YOUNG_ADULT_HBA1C_MIN,
            m.glucose >= YOUNG_ADULT_GLUCOSE_MIN,
            m.smoking == "current",
        ]),
    }
}

fn confidence_step(cluster: Cluster) -> f64 {
    match cluster {
        Cluster::ElderlyHighRisk => ELDERLY_STEP,
        Cluster::HealthyAdult => HEALTHY_ADULT_STEP,
        Cluster::HealthyYouth => YOUTH_STEP,
        Cluster::YoungAdultGlucoseRisk => YOUNG_ADULT_STEP,
    }
}

/// `min(0.9, 0.5 + factors * step)`
pub fn confidence_for(cluster: Cluster, factors: u32) -> f64 {
    MAX_CONFIDENCE.min(BASE_CONFIDENCE + factors as f64 * confidence_step(cluster))
}

/// Predicted slot gets `confidence`, the rest share the remainder evenly
pub fn probabilities_for(cluster: Cluster, confidence: f64) -> [f64; Cluster::COUNT] {
    let others = (1.0 - confidence) / (Cluster::COUNT - 1) as f64;
    let mut probabilities = [others; Cluster::COUNT];
    probabilities[cluster.index()] = confidence;
    probabilities
}

// ============================================================================
// DIAGNOSTIC RISK SCORE
// ============================================================================

/// Additive risk score reported alongside the cluster
///
/// Informational only; cluster assignment never reads it.
pub fn risk_score(input: &HealthInput) -> u32 {
    let m = Measurements::from_input(input);
    let weighted = [
        (m.age > RISK_AGE_OVER, RISK_AGE_WEIGHT),
        (m.bmi > RISK_BMI_OVER, RISK_BMI_WEIGHT),
        (m.hba1c > RISK_HBA1C_OVER, RISK_HBA1C_WEIGHT),
        (m.glucose > RISK_GLUCOSE_OVER, RISK_GLUCOSE_WEIGHT),
        (m.hypertension, RISK_HYPERTENSION_WEIGHT),
        (m.heart_disease, RISK_HEART_DISEASE_WEIGHT),
        (m.smoking == "current", RISK_SMOKING_WEIGHT),
    ];
    weighted
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, weight)| weight)
        .sum()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: HealthInput) -> ClassificationResult {
        classify_with_params(&input, &PreprocessingParameters::fallback()).unwrap()
    }

    fn assert_distribution(result: &ClassificationResult) {
        let sum: f64 = result.probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum = {}", sum);
        assert_eq!(result.probabilities[result.cluster.index()], result.confidence);
        assert!(result.confidence >= BASE_CONFIDENCE && result.confidence <= MAX_CONFIDENCE);
    }

    #[test]
    fn test_child_scenario() {
        let result = run(HealthInput::new(10.0, false, false, 18.0, 5.0, 90.0, "Male", "never"));
        assert_eq!(result.cluster, Cluster::HealthyYouth);
        // age<18 (x2) + bmi + no hypertension + no heart disease = 5 -> capped
        assert_eq!(result.confidence, MAX_CONFIDENCE);
        assert_distribution(&result);
    }

    #[test]
    fn test_elderly_scenario() {
        let result = run(HealthInput::new(65.0, true, false, 30.0, 7.0, 160.0, "Female", "former"));
        assert_eq!(result.cluster, Cluster::ElderlyHighRisk);
        assert_eq!(result.confidence, 0.9);
        assert_distribution(&result);
    }

    #[test]
    fn test_young_adult_scenario() {
        let result = run(HealthInput::new(35.0, false, false, 23.0, 5.9, 95.0, "Male", "current"));
        assert_eq!(result.cluster, Cluster::YoungAdultGlucoseRisk);
        // age band + hba1c + current smoker
        assert_eq!(result.confidence, confidence_for(Cluster::YoungAdultGlucoseRisk, 3));
        assert!((result.confidence - 0.86).abs() < 1e-12);
        assert_distribution(&result);
    }

    #[test]
    fn test_healthy_adult_scenario() {
        let result = run(HealthInput::new(40.0, false, false, 24.0, 5.0, 100.0, "Female", "never"));
        assert_eq!(result.cluster, Cluster::HealthyAdult);
        assert_eq!(result.confidence, MAX_CONFIDENCE);
        assert_distribution(&result);
    }

    #[test]
    fn test_rule_order_child_before_elderly_checks() {
        // Heart disease does not pull a lean child out of rule 1
        let result = run(HealthInput::new(12.0, false, true, 20.0, 6.5, 160.0, "Male", "never"));
        assert_eq!(result.cluster, Cluster::HealthyYouth);
        assert_eq!(result.confidence, confidence_for(Cluster::HealthyYouth, 4));
    }

    #[test]
    fn test_elderly_threshold_boundaries() {
        let base = HealthInput::new(50.0, false, false, 27.9, 5.9, 149.0, "Female", "never");
        // 50 without an elderly marker stays adult
        assert_eq!(run(base.clone()).cluster, Cluster::HealthyAdult);

        let mut bmi = base.clone();
        bmi.bmi = Some(28.0.into());
        assert_eq!(run(bmi).cluster, Cluster::ElderlyHighRisk);

        let mut glucose = base;
        glucose.blood_glucose_level = Some(150.0.into());
        assert_eq!(run(glucose).cluster, Cluster::ElderlyHighRisk);
    }

    #[test]
    fn test_young_adult_band_is_inclusive() {
        let at_45 = run(HealthInput::new(45.0, false, false, 24.0, 5.0, 100.0, "Male", "ever"));
        assert_eq!(at_45.cluster, Cluster::YoungAdultGlucoseRisk);
        // No factor matches: age 45 > 40, hba1c, glucose low, "ever" is not "current"
        assert_eq!(at_45.confidence, BASE_CONFIDENCE);

        let at_46 = run(HealthInput::new(46.0, false, false, 24.0, 5.0, 100.0, "Male", "ever"));
        assert_eq!(at_46.cluster, Cluster::HealthyAdult);
    }

    #[test]
    fn test_age_fallback() {
        // Overweight 20-year-old: rules 1-4 miss, age < 25
        let young = run(HealthInput::new(20.0, false, false, 32.0, 5.0, 100.0, "Male", "never"));
        assert_eq!(young.cluster, Cluster::HealthyYouth);
        assert_eq!(young.confidence, confidence_for(Cluster::HealthyYouth, 2));

        // Teenager with high BMI falls through to the age fallback too
        let teen = run(HealthInput::new(16.0, false, false, 27.0, 5.0, 100.0, "Female", "never"));
        assert_eq!(teen.cluster, Cluster::HealthyYouth);

        // Underweight 70-year-old without markers
        let old = run(HealthInput::new(70.0, false, false, 19.0, 5.0, 100.0, "Female", "never"));
        assert_eq!(old.cluster, Cluster::ElderlyHighRisk);
        assert_eq!(old.confidence, confidence_for(Cluster::ElderlyHighRisk, 1));

        // 50-year-old with low BMI and no markers
        let middle = run(HealthInput::new(50.0, false, false, 19.0, 5.0, 100.0, "Male", "never"));
        assert_eq!(middle.cluster, Cluster::HealthyAdult);
    }

    #[test]
    fn test_healthy_adult_confidence_below_cap() {
        // Rules 1-4 miss, age fallback keeps adult.
        // Factors: age in 30..=55, hba1c, glucose, no heart disease = 4
        let result = run(HealthInput::new(46.0, true, false, 35.0, 5.0, 100.0, "Male", "never"));
        assert_eq!(result.cluster, Cluster::HealthyAdult);
        assert!((result.confidence - 0.82).abs() < 1e-12);
        assert_distribution(&result);

        // Age 55 is the last year of the factor band (hba1c 5.8 misses rule 4)
        let at_55 = run(HealthInput::new(55.0, false, false, 24.0, 5.8, 100.0, "Male", "never"));
        assert_eq!(at_55.cluster, Cluster::HealthyAdult);
        assert!((at_55.confidence - 0.90).abs() < 1e-12);
        let at_56 = run(HealthInput::new(56.0, false, false, 24.0, 5.8, 100.0, "Male", "never"));
        assert_eq!(at_56.cluster, Cluster::HealthyAdult);
        assert!((at_56.confidence - 0.82).abs() < 1e-12);

        // BMI 28 leaves the factor band, BMI 27.9 stays in it
        let in_band = run(HealthInput::new(46.0, true, false, 27.9, 5.0, 100.0, "Male", "never"));
        assert!((in_band.confidence - 0.90).abs() < 1e-12);
        let out_of_band = run(HealthInput::new(46.0, true, false, 28.0, 5.0, 100.0, "Male", "never"));
        assert!((out_of_band.confidence - 0.82).abs() < 1e-12);
    }

    #[test]
    fn test_healthy_adult_rule_upper_bounds_are_exclusive() {
        let in_range = run(HealthInput::new(20.0, false, false, 24.0, 5.0, 100.0, "Male", "never"));
        assert_eq!(in_range.cluster, Cluster::HealthyAdult);

        // Each bound value misses rule 4; a 20-year-old falls back to youth
        let bmi = run(HealthInput::new(20.0, false, false, 30.0, 5.0, 100.0, "Male", "never"));
        assert_eq!(bmi.cluster, Cluster::HealthyYouth);
        assert!((bmi.confidence - 0.7).abs() < 1e-12);

        let glucose = run(HealthInput::new(20.0, false, false, 24.0, 5.0, 126.0, "Male", "never"));
        assert_eq!(glucose.cluster, Cluster::HealthyYouth);
        assert!((glucose.confidence - 0.8).abs() < 1e-12);

        let hba1c = run(HealthInput::new(20.0, false, false, 24.0, 5.7, 100.0, "Male", "never"));
        assert_eq!(hba1c.cluster, Cluster::HealthyYouth);
        assert!((hba1c.confidence - 0.8).abs() < 1e-12);

        // Age 60 misses rule 4 and the fallback sends it to elderly
        let at_60 = run(HealthInput::new(60.0, false, false, 24.0, 5.0, 100.0, "Female", "never"));
        assert_eq!(at_60.cluster, Cluster::ElderlyHighRisk);
        assert_eq!(at_60.confidence, confidence_for(Cluster::ElderlyHighRisk, 1));

        let below_60 = run(HealthInput::new(59.9, false, false, 24.0, 5.0, 100.0, "Female", "never"));
        assert_eq!(below_60.cluster, Cluster::HealthyAdult);
    }

    #[test]
    fn test_string_flags_are_truthy() {
        let mut input = HealthInput::new(55.0, false, false, 22.0, 5.0, 100.0, "Male", "never");
        input.hypertension = Some("1".into());
        assert_eq!(run(input).cluster, Cluster::ElderlyHighRisk);
    }

    #[test]
    fn test_probabilities_for() {
        let probs = probabilities_for(Cluster::HealthyAdult, 0.74);
        assert_eq!(probs[1], 0.74);
        assert_eq!(probs[0], probs[2]);
        assert_eq!(probs[2], probs[3]);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_feature_vector_attached() {
        let result = run(HealthInput::new(40.0, false, false, 24.0, 5.0, 100.0, "Female", "never"));
        assert_eq!(result.features.as_slice().len(), crate::logic::layout::FEATURE_COUNT);
    }

    #[test]
    fn test_risk_score() {
        let elderly = HealthInput::new(65.0, true, false, 30.0, 7.0, 160.0, "Female", "former");
        assert_eq!(risk_score(&elderly), 1 + 1 + 2 + 2 + 1);

        let child = HealthInput::new(10.0, false, false, 18.0, 5.0, 90.0, "Male", "never");
        assert_eq!(risk_score(&child), 0);
    }

    #[test]
    fn test_classify_uses_process_parameters() {
        let input = HealthInput::new(35.0, false, false, 23.0, 5.9, 95.0, "Male", "current");
        assert_eq!(classify(&input).unwrap(), run(input));
    }

    #[test]
    fn test_concurrent_calls_are_deterministic() {
        let input = HealthInput::new(65.0, true, false, 30.0, 7.0, 160.0, "Female", "former");
        let expected = classify(&input).unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| classify(&input).unwrap())).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
