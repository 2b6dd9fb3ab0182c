//! ESP Risk Core - Risk Assessment Engine
//!
//! Converts a seven-feature vibration vector and a classifier's
//! probability distribution into a GREEN / YELLOW / RED assessment.
//!
//! # Pipeline
//!
//! ```text
//! FeatureVector ──► Drift Detector ──► findings ─┐
//!       │                                        ▼
//!       └──► Classifier ──► ProbabilityDistribution ──► Tiered Alert Resolver ──► Assessment
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{RiskError, RiskResult};
pub use logic::drift::{DriftFinding, DriftThresholdTable};
pub use logic::features::FeatureVector;
pub use logic::model::{Classifier, ClassifierError, OnnxClassifier};
pub use logic::risk::{AlertTier, Assessment, ProbabilityDistribution, RiskConfig, RiskEngine, RiskPolicy};
