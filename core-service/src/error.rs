//! Error types for the risk assessment engine.

use thiserror::Error;

/// Errors raised by the engine and its input types.
///
/// None of these are retried: the engine is stateless, so a retry
/// reproduces the identical failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// Feature vector does not match the fixed layout length.
    #[error("Expected {expected} features, but received {actual}")]
    InvalidFeatureCount { expected: usize, actual: usize },

    /// Distribution has no label other than "Normal".
    #[error("probability distribution has no fault labels")]
    EmptyFaultSet,

    /// Distribution lacks the reserved "Normal" label.
    #[error("probability distribution is missing the 'Normal' label")]
    MissingNormalLabel,

    #[error("duplicate class label '{0}'")]
    DuplicateLabel(String),

    /// Classifier returned parallel arrays of different length.
    #[error("{labels} class labels but {probabilities} probabilities")]
    LabelCountMismatch { labels: usize, probabilities: usize },

    #[error("invalid probability {value} for label '{label}'")]
    InvalidProbability { label: String, value: f64 },

    #[error("drift threshold index {index} is outside the feature layout ({count} features)")]
    InvalidThresholdIndex { index: usize, count: usize },

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
}

/// Result type for engine operations.
pub type RiskResult<T> = Result<T, RiskError>;
