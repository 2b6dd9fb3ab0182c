//! Probability Distribution
//!
//! Classifier output keyed by class label. The reserved "Normal" label is a
//! dedicated field, so a distribution without it cannot be constructed.
//! Fault labels live in a `BTreeMap`, which fixes iteration order to
//! lexicographic label order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{NORMAL_LABEL, PROBABILITY_TOLERANCE};
use crate::error::{RiskError, RiskResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct ProbabilityDistribution {
    normal: f64,
    faults: BTreeMap<String, f64>,
}

impl ProbabilityDistribution {
    /// Build from (label, probability) pairs.
    ///
    /// Probabilities are range-checked (with rounding slack) but their sum
    /// is left to the classifier.
    pub fn new<I, S>(pairs: I) -> RiskResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut normal = None;
        let mut faults = BTreeMap::new();

        for (label, probability) in pairs {
            let label = label.into();
            if !probability.is_finite()
                || probability < -PROBABILITY_TOLERANCE
                || probability > 1.0 + PROBABILITY_TOLERANCE
            {
                return Err(RiskError::InvalidProbability { label, value: probability });
            }

            if label == NORMAL_LABEL {
                if normal.replace(probability).is_some() {
                    return Err(RiskError::DuplicateLabel(label));
                }
            } else if faults.contains_key(&label) {
                return Err(RiskError::DuplicateLabel(label));
            } else {
                faults.insert(label, probability);
            }
        }

        let normal = normal.ok_or(RiskError::MissingNormalLabel)?;
        Ok(Self { normal, faults })
    }

    /// Build from the classifier's parallel arrays (label encoder classes
    /// and one probability row).
    pub fn from_parallel<S: AsRef<str>>(labels: &[S], probabilities: &[f64]) -> RiskResult<Self> {
        if labels.len() != probabilities.len() {
            return Err(RiskError::LabelCountMismatch {
                labels: labels.len(),
                probabilities: probabilities.len(),
            });
        }
        Self::new(
            labels
                .iter()
                .map(|l| l.as_ref().to_string())
                .zip(probabilities.iter().copied()),
        )
    }

    /// Probability of healthy operation
    pub fn normal(&self) -> f64 {
        self.normal
    }

    /// Fault labels in lexicographic order
    pub fn faults(&self) -> impl Iterator<Item = (&str, f64)> {
        self.faults.iter().map(|(label, p)| (label.as_str(), *p))
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        if label == NORMAL_LABEL {
            Some(self.normal)
        } else {
            self.faults.get(label).copied()
        }
    }

    /// All labels including "Normal", in lexicographic order
    pub fn entries(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.faults().collect();
        let at = entries
            .binary_search_by(|(label, _)| (*label).cmp(NORMAL_LABEL))
            .unwrap_or_else(|i| i);
        entries.insert(at, (NORMAL_LABEL, self.normal));
        entries
    }

    pub fn len(&self) -> usize {
        self.faults.len() + 1
    }

    /// Never empty: "Normal" is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The fault label with the highest probability.
    ///
    /// Ties go to the lexicographically smallest label. Fails with
    /// `EmptyFaultSet` when the classifier only knows "Normal".
    pub fn developing_fault(&self) -> RiskResult<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (label, p) in self.faults() {
            match best {
                Some((_, top)) if p <= top => {}
                _ => best = Some((label, p)),
            }
        }
        best.ok_or(RiskError::EmptyFaultSet)
    }
}

impl TryFrom<BTreeMap<String, f64>> for ProbabilityDistribution {
    type Error = RiskError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

/// Serialized as a flat `{label: probability}` object
impl Serialize for ProbabilityDistribution {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries())
    }
}

// ============================================================================
// TESTS
// ============================================================================
