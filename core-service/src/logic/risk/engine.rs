//! Risk Engine
//!
//! Owns the immutable configuration (drift table + tier policy) and runs
//! detector then resolver. Build one at startup and share it behind an
//! `Arc`; `assess` takes `&self` and touches no shared mutable state.

use serde::Serialize;

use super::probabilities::ProbabilityDistribution;
use super::resolver::resolve;
use super::rules::RiskPolicy;
use super::types::Assessment;
use crate::error::RiskResult;
use crate::logic::drift::{detect, DriftFinding, DriftThresholdTable};
use crate::logic::features::FeatureVector;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RiskConfig {
    pub drift: DriftThresholdTable,
    pub policy: RiskPolicy,
}

#[derive(Debug, Clone)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> RiskResult<Self> {
        config.policy.validate()?;
        if config.drift.is_empty() {
            log::warn!("No drift bounds configured; YELLOW only from classifier probabilities");
        }
        log::info!(
            "Risk engine initialized: red > {:.2}, developing fault rule {}, {} drift bounds",
            config.policy.red_threshold,
            config.policy.developing_fault,
            config.drift.len()
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn check_drift(&self, features: &FeatureVector) -> Vec<DriftFinding> {
        detect(features, &self.config.drift)
    }

    pub fn assess(
        &self,
        features: &FeatureVector,
        probabilities: &ProbabilityDistribution,
    ) -> RiskResult<Assessment> {
        let drift = self.check_drift(features);
        if !drift.is_empty() {
            log::info!(
                "Feature drift in {} of {} bounded features",
                drift.len(),
                self.config.drift.len()
            );
        }

        let assessment = resolve(probabilities, &drift, &self.config.policy)?;
        log::debug!("Assessment: {} ({})", assessment.tier, assessment.reason);
        Ok(assessment)
    }

    /// Same as `assess`, for callers holding unchecked input
    pub fn assess_raw(
        &self,
        features: &[f64],
        probabilities: &ProbabilityDistribution,
    ) -> RiskResult<Assessment> {
        let features = FeatureVector::try_from(features)?;
        self.assess(&features, probabilities)
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self { config: RiskConfig::default() }
    }
}

// ============================================================================
// TESTS
// ============================================================================
