//! Model Module - Classifier seam
//!
//! Keeps model loading and inference apart from the risk policy.
//! Easy to swap model or plug in a test double.

pub mod inference;
pub mod manifest;

// Re-export common types
pub use inference::{Classifier, ClassifierError, ClassifierStats, ModelMetadata, OnnxClassifier};
pub use manifest::{sha256_hex, ModelManifest};
