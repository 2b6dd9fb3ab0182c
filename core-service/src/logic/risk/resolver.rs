//! Tiered Alert Resolver
//!
//! ONLY the tier decision lives here: no types, no policy constants.
//! Input: ProbabilityDistribution, drift findings, RiskPolicy
//! Output: Assessment

use super::probabilities::ProbabilityDistribution;
use super::rules::RiskPolicy;
use super::types::{AlertTier, Assessment};
use crate::constants::{GREEN_ACTION, RED_ACTION, YELLOW_ACTION};
use crate::error::RiskResult;
use crate::logic::drift::DriftFinding;

// ============================================================================
// MAIN RESOLVE FUNCTION
// ============================================================================

/// Ordered decision list: RED, then YELLOW, then GREEN. First match wins.
pub fn resolve(
    probabilities: &ProbabilityDistribution,
    drift: &[DriftFinding],
    policy: &RiskPolicy,
) -> RiskResult<Assessment> {
    // Needed by both RED and YELLOW; a classifier that only knows "Normal"
    // is rejected here rather than reported as healthy
    let (fault, fault_probability) = probabilities.developing_fault()?;

    // Tier 1: RED - any fault above the red threshold. The top fault is
    // necessarily one of them.
    if fault_probability > policy.red_threshold {
        return Ok(Assessment::new(
            AlertTier::Red,
            RED_ACTION,
            format!(
                "Model has high confidence ({}) of a clear '{}' fault.",
                percent(fault_probability, 0),
                fault
            ),
            probabilities.clone(),
        ));
    }

    // Tier 2: YELLOW - developing fault or feature drift
    let developing = policy
        .developing_fault
        .fires(probabilities.normal(), fault_probability);

    if developing || !drift.is_empty() {
        let mut reasons = Vec::with_capacity(2);
        if developing {
            reasons.push(format!(
                "A potential '{}' fault is developing with {} probability.",
                fault,
                percent(fault_probability, 1)
            ));
        }
        if !drift.is_empty() {
            let flagged: Vec<String> = drift.iter().map(ToString::to_string).collect();
            reasons.push(format!("Feature drift detected in: {}.", flagged.join(", ")));
        }

        return Ok(Assessment::new(
            AlertTier::Yellow,
            YELLOW_ACTION,
            reasons.join(" "),
            probabilities.clone(),
        ));
    }

    // Tier 3: GREEN
    Ok(Assessment::new(
        AlertTier::Green,
        GREEN_ACTION,
        format!(
            "Model has high confidence ({}) of healthy operation.",
            percent(probabilities.normal(), 0)
        ),
        probabilities.clone(),
    ))
}

/// `0.9` -> `"90%"` (0 decimals), `0.1234` -> `"12.3%"` (1 decimal)
fn percent(probability: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, probability * 100.0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskError;
    use crate::logic::drift::BoundDirection;

    fn dist(pairs: &[(&str, f64)]) -> ProbabilityDistribution {
        ProbabilityDistribution::new(pairs.iter().copied()).unwrap()
    }

    fn finding(index: usize, feature: &str, value: f64) -> DriftFinding {
        DriftFinding {
            index,
            feature: feature.to_string(),
            value,
            threshold: 0.0,
            bound: BoundDirection::Upper,
        }
    }

    #[test]
    fn test_percent_format() {
        assert_eq!(percent(0.9, 0), "90%");
        assert_eq!(percent(0.95, 0), "95%");
        assert_eq!(percent(0.254, 1), "25.4%");
        assert_eq!(percent(1.0, 0), "100%");
    }

    #[test]
    fn test_red_alert() {
        let probs = dist(&[("Normal", 0.10), ("Seal Wear", 0.90)]);
        let result = resolve(&probs, &[], &RiskPolicy::default()).unwrap();

        assert_eq!(result.tier, AlertTier::Red);
        assert_eq!(result.action, RED_ACTION);
        assert_eq!(result.reason, "Model has high confidence (90%) of a clear 'Seal Wear' fault.");
        assert_eq!(result.probabilities, probs);
    }

    #[test]
    fn test_red_ignores_drift() {
        let probs = dist(&[("Normal", 0.05), ("Rub", 0.95)]);
        let drift = vec![finding(4, "peak2x", 0.8)];
        let result = resolve(&probs, &drift, &RiskPolicy::default()).unwrap();

        assert_eq!(result.tier, AlertTier::Red);
        assert!(!result.reason.contains("drift"));
    }

    #[test]
    fn test_red_threshold_is_strict() {
        let probs = dist(&[("Normal", 0.15), ("Rub", 0.85)]);
        let result = resolve(&probs, &[], &RiskPolicy::default()).unwrap();
        assert_eq!(result.tier, AlertTier::Yellow);
    }

    #[test]
    fn test_red_tie_names_lexicographic_first() {
        // Rounded classifier output can put two labels above the bar
        let probs = dist(&[("Normal", 0.0), ("Vane Damage", 0.9), ("Impeller Wear", 0.9)]);
        let result = resolve(&probs, &[], &RiskPolicy::default()).unwrap();
        assert!(result.reason.contains("'Impeller Wear'"));
    }

    #[test]
    fn test_yellow_developing_fault_only() {
        let probs = dist(&[("Normal", 0.75), ("Bearing Fault", 0.25)]);
        let result = resolve(&probs, &[], &RiskPolicy::default()).unwrap();

        assert_eq!(result.tier, AlertTier::Yellow);
        assert_eq!(result.action, YELLOW_ACTION);
        assert_eq!(
            result.reason,
            "A potential 'Bearing Fault' fault is developing with 25.0% probability."
        );
    }

    #[test]
    fn test_yellow_drift_only() {
        let probs = dist(&[("Normal", 0.97), ("Bearing Fault", 0.03)]);
        let drift = vec![finding(1, "rms(98,102)", 0.2)];
        let result = resolve(&probs, &drift, &RiskPolicy::default()).unwrap();

        assert_eq!(result.tier, AlertTier::Yellow);
        assert_eq!(result.reason, "Feature drift detected in: rms(98,102) (value: 0.200).");
        assert!(!result.reason.contains("Bearing Fault"));
    }

    #[test]
    fn test_yellow_both_reasons_in_order() {
        let probs = dist(&[("Normal", 0.6), ("Rub", 0.3), ("Seal Wear", 0.1)]);
        let drift = vec![finding(2, "median(98,102)", 0.3), finding(4, "peak2x", 0.8)];
        let result = resolve(&probs, &drift, &RiskPolicy::default()).unwrap();

        assert_eq!(
            result.reason,
            "A potential 'Rub' fault is developing with 30.0% probability. \
             Feature drift detected in: median(98,102) (value: 0.300), peak2x (value: 0.800)."
        );
    }

    #[test]
    fn test_green() {
        let probs = dist(&[("Normal", 0.95), ("Bearing Fault", 0.05)]);
        let result = resolve(&probs, &[], &RiskPolicy::default()).unwrap();

        assert_eq!(result.tier, AlertTier::Green);
        assert_eq!(result.action, GREEN_ACTION);
        assert_eq!(result.reason, "Model has high confidence (95%) of healthy operation.");
    }

    #[test]
    fn test_normal_floor_variant() {
        // Top fault at 10% is quiet under the default rule...
        let probs = dist(&[("Normal", 0.85), ("Rub", 0.10), ("Seal Wear", 0.05)]);
        let green = resolve(&probs, &[], &RiskPolicy::default()).unwrap();
        assert_eq!(green.tier, AlertTier::Green);

        // ...but "Normal" is under 90%
        let yellow = resolve(&probs, &[], &RiskPolicy::normal_floor()).unwrap();
        assert_eq!(yellow.tier, AlertTier::Yellow);
        assert!(yellow.reason.contains("'Rub'"));
        assert!(yellow.reason.contains("10.0%"));
    }

    #[test]
    fn test_empty_fault_set_is_an_error() {
        let probs = dist(&[("Normal", 1.0)]);
        assert_eq!(
            resolve(&probs, &[], &RiskPolicy::default()),
            Err(RiskError::EmptyFaultSet)
        );
    }
}
