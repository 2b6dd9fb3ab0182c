//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the trained condition classifier and maps its probability row
//! onto a `ProbabilityDistribution`. The risk engine never sees the model;
//! it only consumes the `Classifier` trait's output.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::manifest::{sha256_hex, ModelManifest};
use crate::error::RiskError;
use crate::logic::features::{FeatureVector, FEATURE_COUNT};
use crate::logic::risk::ProbabilityDistribution;

/// Output name skl2onnx uses for the probability tensor (zipmap disabled)
const DEFAULT_PROBABILITY_OUTPUT: &str = "probabilities";

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("model not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid model manifest: {0}")]
    Manifest(String),

    #[error("model checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("feature layout mismatch: expected hash {expected:08x}, model has {actual:08x}")]
    LayoutMismatch { expected: u32, actual: u32 },

    #[error("session error: {0}")]
    Session(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("classifier returned {actual} probabilities for {expected} classes")]
    OutputShape { expected: usize, actual: usize },

    #[error(transparent)]
    Distribution(#[from] RiskError),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// External condition classifier (ONNX, remote, fixed test double, ...)
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Class labels in model output order
    fn classes(&self) -> &[String];

    fn predict_proba(&self, features: &FeatureVector) -> Result<ProbabilityDistribution, ClassifierError>;

    fn stats(&self) -> ClassifierStats {
        ClassifierStats::default()
    }

    /// Artifact details, when the classifier was loaded from one
    fn metadata(&self) -> Option<&ModelMetadata> {
        None
    }
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub classes: Vec<String>,
    pub sha256: String,
    pub probability_output: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Inference counters for status reporting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierStats {
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxClassifier {
    session: Mutex<Session>,
    manifest: ModelManifest,
    metadata: ModelMetadata,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl OnnxClassifier {
    /// Load model + manifest sidecar. The manifest is checked (layout,
    /// classes, checksum) before any session is created.
    pub fn load(model_path: &Path, manifest_path: &Path) -> Result<Self, ClassifierError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ClassifierError::ModelNotFound(model_path.to_path_buf()));
        }

        let manifest = ModelManifest::load(manifest_path)?;
        let model_bytes = std::fs::read(model_path)?;
        manifest.verify_checksum(&model_bytes)?;

        let session = Session::builder()
            .map_err(|e| ClassifierError::Session(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ClassifierError::Session(format!("Failed to set optimization: {}", e)))?
            .commit_from_memory(&model_bytes)
            .map_err(|e| ClassifierError::Session(format!("Failed to load model: {}", e)))?;

        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let probability_output = resolve_output_name(&output_names, manifest.probability_output.as_deref())?;

        log::info!(
            "ONNX model loaded: {} classes, probability output '{}'",
            manifest.classes.len(),
            probability_output
        );

        let metadata = ModelMetadata {
            model_path: model_path.display().to_string(),
            classes: manifest.classes.clone(),
            sha256: sha256_hex(&model_bytes),
            probability_output,
            loaded_at: chrono::Utc::now(),
        };

        Ok(Self {
            session: Mutex::new(session),
            manifest,
            metadata,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        })
    }

    /// Load with the manifest next to the model (`<model>.json`)
    pub fn load_with_sidecar(model_path: &Path) -> Result<Self, ClassifierError> {
        Self::load(model_path, &ModelManifest::path_for(model_path))
    }

    fn run(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_f32().to_vec())
            .map_err(|e| ClassifierError::Inference(format!("Array error: {}", e)))?;

        let input_tensor = Tensor::from_array(input_array)
            .map_err(|e| ClassifierError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let output = outputs
            .get(self.metadata.probability_output.as_str())
            .ok_or_else(|| ClassifierError::Inference("No probability output".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("Extract error: {}", e)))?;

        let row: Vec<f64> = output_tensor.1.iter().map(|&p| f64::from(p)).collect();
        Ok(row)
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.metadata.model_path
    }

    fn classes(&self) -> &[String] {
        &self.manifest.classes
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<ProbabilityDistribution, ClassifierError> {
        let start_time = std::time::Instant::now();

        let row = self.run(features)?;
        if row.len() != self.manifest.classes.len() {
            return Err(ClassifierError::OutputShape {
                expected: self.manifest.classes.len(),
                actual: row.len(),
            });
        }

        self.latency_sum_us
            .fetch_add(start_time.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(ProbabilityDistribution::from_parallel(&self.manifest.classes, &row)?)
    }

    fn stats(&self) -> ClassifierStats {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        ClassifierStats {
            inference_count: count,
            avg_latency_ms: avg,
        }
    }

    fn metadata(&self) -> Option<&ModelMetadata> {
        Some(&self.metadata)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Manifest name if given, else `probabilities`, else the last output
/// (skl2onnx emits label first, probabilities second).
fn resolve_output_name(outputs: &[String], configured: Option<&str>) -> Result<String, ClassifierError> {
    if let Some(name) = configured {
        return outputs
            .iter()
            .find(|o| o.as_str() == name)
            .cloned()
            .ok_or_else(|| ClassifierError::Session(format!("Model has no output named '{}'", name)));
    }

    outputs
        .iter()
        .find(|o| o.as_str() == DEFAULT_PROBABILITY_OUTPUT)
        .or_else(|| outputs.last())
        .cloned()
        .ok_or_else(|| ClassifierError::Session("No output defined".to_string()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_output_name() {
        let outputs = names(&["label", "probabilities"]);
        assert_eq!(resolve_output_name(&outputs, None).unwrap(), "probabilities");

        let outputs = names(&["output_label", "output_probability"]);
        assert_eq!(resolve_output_name(&outputs, None).unwrap(), "output_probability");
        assert_eq!(
            resolve_output_name(&outputs, Some("output_label")).unwrap(),
            "output_label"
        );
        assert!(resolve_output_name(&outputs, Some("scores")).is_err());
        assert!(resolve_output_name(&[], None).is_err());
    }

    #[test]
    fn test_load_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("missing.onnx");
        let result = OnnxClassifier::load_with_sidecar(&model);
        assert!(matches!(result, Err(ClassifierError::ModelNotFound(_))));
    }

    #[test]
    fn test_load_rejects_checksum_before_session() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("esp.onnx");
        std::fs::write(&model, b"not really onnx").unwrap();

        let mut manifest = ModelManifest::new(names(&["Normal", "Rub"]));
        manifest.sha256 = Some(sha256_hex(b"the trained model"));
        let mut file = std::fs::File::create(ModelManifest::path_for(&model)).unwrap();
        file.write_all(serde_json::to_string(&manifest).unwrap().as_bytes()).unwrap();

        let result = OnnxClassifier::load_with_sidecar(&model);
        assert!(matches!(result, Err(ClassifierError::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("esp.onnx");
        std::fs::write(&model, b"bytes").unwrap();

        let result = OnnxClassifier::load_with_sidecar(&model);
        assert!(matches!(result, Err(ClassifierError::Manifest(_))));
    }

    #[test]
    fn test_distribution_error_converts() {
        let err: ClassifierError = RiskError::MissingNormalLabel.into();
        assert!(matches!(err, ClassifierError::Distribution(RiskError::MissingNormalLabel)));
        assert_eq!(err.to_string(), RiskError::MissingNormalLabel.to_string());
    }
}
