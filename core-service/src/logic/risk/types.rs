//! Risk Types
//!
//! Core types for tiered alerting.
//! No logic here, only data structures.

use serde::{Deserialize, Serialize};

use super::probabilities::ProbabilityDistribution;

// ============================================================================
// ALERT TIER
// ============================================================================

/// Alert tiers, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertTier {
    /// Healthy operation, safe to continue
    #[serde(rename = "GREEN: HEALTHY")]
    Green,
    /// Developing fault or feature drift, needs expert review
    #[serde(rename = "YELLOW ALERT: INCIPIENT FAULT WARNING")]
    Yellow,
    /// High-confidence fault, needs maintenance now
    #[serde(rename = "RED ALERT: HIGH-RISK FAULT")]
    Red,
}

impl AlertTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertTier::Green => "GREEN: HEALTHY",
            AlertTier::Yellow => "YELLOW ALERT: INCIPIENT FAULT WARNING",
            AlertTier::Red => "RED ALERT: HIGH-RISK FAULT",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            AlertTier::Green => 0,
            AlertTier::Yellow => 1,
            AlertTier::Red => 2,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AlertTier::Green => "#10b981",
            AlertTier::Yellow => "#f59e0b",
            AlertTier::Red => "#ef4444",
        }
    }
}

impl std::fmt::Display for AlertTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ASSESSMENT
// ============================================================================

/// Engine output for one request. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(rename = "alert_level")]
    pub tier: AlertTier,
    pub action: String,
    pub reason: String,
    /// Unmodified classifier output, for display
    pub probabilities: ProbabilityDistribution,
}

impl Assessment {
    pub fn new(
        tier: AlertTier,
        action: impl Into<String>,
        reason: impl Into<String>,
        probabilities: ProbabilityDistribution,
    ) -> Self {
        Self {
            tier,
            action: action.into(),
            reason: reason.into(),
            probabilities,
        }
    }
}
