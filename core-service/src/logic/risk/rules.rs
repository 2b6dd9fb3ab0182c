//! Risk Policy & Thresholds
//!
//! Tier thresholds for the resolver.
//! No resolve logic here, only config.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DEVELOPING_FAULT_THRESHOLD, DEFAULT_NORMAL_FLOOR, DEFAULT_RED_THRESHOLD};
use crate::error::{RiskError, RiskResult};

// ============================================================================
// DEVELOPING FAULT RULE (YELLOW tier, probability half)
// ============================================================================

/// Exactly one variant is active per engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "threshold", rename_all = "snake_case")]
pub enum DevelopingFaultRule {
    /// Top fault probability > threshold
    FaultProbabilityAbove(f64),
    /// "Normal" probability < threshold
    NormalProbabilityBelow(f64),
}

impl DevelopingFaultRule {
    pub fn threshold(&self) -> f64 {
        match self {
            DevelopingFaultRule::FaultProbabilityAbove(t)
            | DevelopingFaultRule::NormalProbabilityBelow(t) => *t,
        }
    }

    pub fn fires(&self, normal: f64, top_fault: f64) -> bool {
        match self {
            DevelopingFaultRule::FaultProbabilityAbove(t) => top_fault > *t,
            DevelopingFaultRule::NormalProbabilityBelow(t) => normal < *t,
        }
    }
}

impl Default for DevelopingFaultRule {
    fn default() -> Self {
        DevelopingFaultRule::FaultProbabilityAbove(DEFAULT_DEVELOPING_FAULT_THRESHOLD)
    }
}

impl std::fmt::Display for DevelopingFaultRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DevelopingFaultRule::FaultProbabilityAbove(t) => write!(f, "fault_above:{}", t),
            DevelopingFaultRule::NormalProbabilityBelow(t) => write!(f, "normal_below:{}", t),
        }
    }
}

/// Parses `fault_above:<t>` or `normal_below:<t>`. A bare rule name uses
/// its default threshold.
impl FromStr for DevelopingFaultRule {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.trim().split_once(':') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (s.trim(), None),
        };

        let threshold = value
            .map(|v| {
                v.parse::<f64>()
                    .map_err(|_| RiskError::InvalidPolicy(format!("bad threshold '{}'", v)))
            })
            .transpose()?;

        match name {
            "fault_above" => Ok(DevelopingFaultRule::FaultProbabilityAbove(
                threshold.unwrap_or(DEFAULT_DEVELOPING_FAULT_THRESHOLD),
            )),
            "normal_below" => Ok(DevelopingFaultRule::NormalProbabilityBelow(
                threshold.unwrap_or(DEFAULT_NORMAL_FLOOR),
            )),
            other => Err(RiskError::InvalidPolicy(format!("unknown developing fault rule '{}'", other))),
        }
    }
}

// ============================================================================
// POLICY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// Any fault strictly above this = RED
    pub red_threshold: f64,
    pub developing_fault: DevelopingFaultRule,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            red_threshold: DEFAULT_RED_THRESHOLD,
            developing_fault: DevelopingFaultRule::default(),
        }
    }
}

impl RiskPolicy {
    /// Earlier API behavior: YELLOW when "Normal" drops below 90%
    pub fn normal_floor() -> Self {
        Self {
            developing_fault: DevelopingFaultRule::NormalProbabilityBelow(DEFAULT_NORMAL_FLOOR),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> RiskResult<()> {
        for (name, value) in [
            ("red_threshold", self.red_threshold),
            ("developing_fault", self.developing_fault.threshold()),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(RiskError::InvalidPolicy(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
