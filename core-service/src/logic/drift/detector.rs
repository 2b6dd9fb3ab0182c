//! Drift Detector
//!
//! Compares raw readings against the fixed engineering bounds,
//! independent of what the classifier thinks.

use super::types::{DriftFinding, DriftThresholdTable};
use crate::logic::features::FeatureVector;

/// Findings ordered by increasing feature index.
///
/// Indices without a table entry are never evaluated.
pub fn detect(features: &FeatureVector, table: &DriftThresholdTable) -> Vec<DriftFinding> {
    table
        .entries()
        .filter_map(|entry| {
            let value = features.get(entry.index)?;
            entry.bound.is_violated(value, entry.threshold).then(|| DriftFinding {
                index: entry.index,
                feature: entry.feature.clone(),
                value,
                threshold: entry.threshold,
                bound: entry.bound,
            })
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Every configured feature sits just inside its bound
    fn healthy() -> FeatureVector {
        FeatureVector::from([0.001, 0.1, 0.001, 5.0, 0.01, 0.5, -7.0])
    }

    #[test]
    fn test_no_drift_inside_bounds() {
        let findings = detect(&healthy(), &DriftThresholdTable::default());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_reference_vector() {
        let features = FeatureVector::from([-1.0, 0.2, 0.3, 0.1, 0.8, 0.4, 0.3]);
        let findings = detect(&features, &DriftThresholdTable::default());

        let rendered: Vec<String> = findings.iter().map(|f| f.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "rms(98,102) (value: 0.200)",
                "median(98,102) (value: 0.300)",
                "peak2x (value: 0.800)",
                "b (value: 0.300)",
            ]
        );
    }

    #[test]
    fn test_equal_to_threshold_does_not_drift() {
        let features = FeatureVector::from([0.003, 0.18, 0.002, 0.0, 0.012, -0.001, -6.0]);
        assert!(detect(&features, &DriftThresholdTable::default()).is_empty());
    }

    #[test]
    fn test_lower_bound() {
        let mut values = *healthy().as_array();
        values[5] = -0.5;
        let findings = detect(&FeatureVector::from(values), &DriftThresholdTable::default());

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].feature, "a");
        assert_eq!(findings[0].value, -0.5);
    }

    #[test]
    fn test_unconfigured_feature_ignored() {
        let mut values = *healthy().as_array();
        values[3] = 1_000.0; // peak1x has no bound
        assert!(detect(&FeatureVector::from(values), &DriftThresholdTable::default()).is_empty());
    }

    #[test]
    fn test_custom_table() {
        let table = DriftThresholdTable::builder().upper(3, 1.0).build().unwrap();
        let findings = detect(&FeatureVector::from([9.0, 9.0, 9.0, 1.5, 9.0, 9.0, 9.0]), &table);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].feature, "peak1x");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn value_at_threshold_never_drifts(
                mut values in proptest::array::uniform7(-100.0f64..100.0),
                index in 0usize..7,
                threshold in -100.0f64..100.0,
                upper in any::<bool>(),
            ) {
                let builder = DriftThresholdTable::builder();
                let table = if upper {
                    builder.upper(index, threshold)
                } else {
                    builder.lower(index, threshold)
                }
                .build()
                .unwrap();

                values[index] = threshold;
                prop_assert!(detect(&FeatureVector::from(values), &table).is_empty());

                values[index] = if upper { threshold + 1.0 } else { threshold - 1.0 };
                let findings = detect(&FeatureVector::from(values), &table);
                prop_assert_eq!(findings.len(), 1);
                prop_assert_eq!(findings[0].index, index);
            }
        }
    }
}
