//! Feature Vector - Core data structure for engine and classifier input
//!
//! Length is fixed by the type; the only way in from untrusted input is
//! `TryFrom<&[f64]>`, which rejects anything but exactly `FEATURE_COUNT`
//! values.

use serde::{Deserialize, Serialize};

use super::layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::error::RiskError;

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Seven readings in the order defined by FEATURE_LAYOUT
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Values narrowed for f32 tensor input
    pub fn to_f32(&self) -> [f32; FEATURE_COUNT] {
        self.values.map(|v| v as f32)
    }

    /// (name, value) pairs in layout order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

impl TryFrom<&[f64]> for FeatureVector {
    type Error = RiskError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let values: [f64; FEATURE_COUNT] =
            values.try_into().map_err(|_| RiskError::InvalidFeatureCount {
                expected: FEATURE_COUNT,
                actual: values.len(),
            })?;
        Ok(Self { values })
    }
}

// ============================================================================
// TESTS
// ============================================================================
