//! Drift Types
//!
//! Threshold table and findings.
//! No detection logic here, only data structures.

use serde::{Deserialize, Serialize};

use crate::error::RiskError;
use crate::logic::features::{feature_name, FEATURE_COUNT};

// ============================================================================
// BOUND DIRECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundDirection {
    /// Drifts when value > threshold
    Upper,
    /// Drifts when value < threshold
    Lower,
}

impl BoundDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundDirection::Upper => "upper",
            BoundDirection::Lower => "lower",
        }
    }

    /// Strict comparison: a value equal to the threshold never violates.
    pub fn is_violated(&self, value: f64, threshold: f64) -> bool {
        match self {
            BoundDirection::Upper => value > threshold,
            BoundDirection::Lower => value < threshold,
        }
    }
}

// ============================================================================
// THRESHOLD TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftThreshold {
    pub index: usize,
    pub feature: String,
    pub threshold: f64,
    pub bound: BoundDirection,
}

/// Per-feature engineering bounds, keyed by position in the layout.
///
/// Built once at startup and shared read-only afterwards; there is no
/// mutating API once `build()` returns.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftThresholdTable {
    entries: [Option<DriftThreshold>; FEATURE_COUNT],
}

impl DriftThresholdTable {
    pub fn builder() -> DriftThresholdTableBuilder {
        DriftThresholdTableBuilder::default()
    }

    /// Configured entries in increasing feature index
    pub fn entries(&self) -> impl Iterator<Item = &DriftThreshold> {
        self.entries.iter().flatten()
    }

    pub fn get(&self, index: usize) -> Option<&DriftThreshold> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DriftThresholdTable {
    /// Engineering bounds for the ESP layout. `peak1x` is left out as a
    /// weak indicator.
    fn default() -> Self {
        let mut entries: [Option<DriftThreshold>; FEATURE_COUNT] = Default::default();
        for (index, threshold, bound) in [
            (0, 0.003, BoundDirection::Upper),
            (1, 0.18, BoundDirection::Upper),
            (2, 0.002, BoundDirection::Upper),
            (4, 0.012, BoundDirection::Upper),
            (5, -0.001, BoundDirection::Lower),
            (6, -6.0, BoundDirection::Upper),
        ] {
            entries[index] = Some(DriftThreshold {
                index,
                feature: feature_name(index).unwrap_or("unknown").to_string(),
                threshold,
                bound,
            });
        }
        Self { entries }
    }
}

/// Serialized as the list of configured entries
impl Serialize for DriftThresholdTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries())
    }
}

#[derive(Debug, Default)]
pub struct DriftThresholdTableBuilder {
    entries: Vec<(usize, f64, BoundDirection)>,
}

impl DriftThresholdTableBuilder {
    pub fn upper(mut self, index: usize, threshold: f64) -> Self {
        self.entries.push((index, threshold, BoundDirection::Upper));
        self
    }

    pub fn lower(mut self, index: usize, threshold: f64) -> Self {
        self.entries.push((index, threshold, BoundDirection::Lower));
        self
    }

    /// Later entries for the same index replace earlier ones.
    pub fn build(self) -> Result<DriftThresholdTable, RiskError> {
        let mut entries: [Option<DriftThreshold>; FEATURE_COUNT] = Default::default();
        for (index, threshold, bound) in self.entries {
            let feature = feature_name(index).ok_or(RiskError::InvalidThresholdIndex {
                index,
                count: FEATURE_COUNT,
            })?;
            entries[index] = Some(DriftThreshold {
                index,
                feature: feature.to_string(),
                threshold,
                bound,
            });
        }
        Ok(DriftThresholdTable { entries })
    }
}

// ============================================================================
// FINDING
// ============================================================================

/// One feature reading outside its configured bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftFinding {
    pub index: usize,
    pub feature: String,
    pub value: f64,
    pub threshold: f64,
    pub bound: BoundDirection,
}

impl std::fmt::Display for DriftFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (value: {:.3})", self.feature, self.value)
    }
}
