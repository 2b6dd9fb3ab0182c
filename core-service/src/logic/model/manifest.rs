//! Model Manifest
//!
//! JSON sidecar shipped next to the model artifact. Carries the label
//! encoder classes (in model output order) plus the checks run before a
//! session is created.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::inference::ClassifierError;
use crate::constants::NORMAL_LABEL;
use crate::logic::features::{layout_hash, FEATURE_COUNT};

fn default_feature_count() -> usize {
    FEATURE_COUNT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Class labels, index-aligned with the probability output
    pub classes: Vec<String>,

    #[serde(default = "default_feature_count")]
    pub feature_count: usize,

    /// CRC32 of the feature layout the model was trained on
    #[serde(default)]
    pub layout_hash: Option<u32>,

    /// Hex SHA-256 of the model file
    #[serde(default)]
    pub sha256: Option<String>,

    /// Name of the probability tensor output
    #[serde(default)]
    pub probability_output: Option<String>,
}

impl ModelManifest {
    pub fn new(classes: Vec<String>) -> Self {
        Self {
            classes,
            feature_count: FEATURE_COUNT,
            layout_hash: Some(layout_hash()),
            sha256: None,
            probability_output: None,
        }
    }

    /// `models/esp.onnx` -> `models/esp.json`
    pub fn path_for(model_path: &Path) -> PathBuf {
        model_path.with_extension("json")
    }

    /// Read, parse and validate
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::Manifest(format!("{}: {}", path.display(), e)))?;
        let manifest: Self = serde_json::from_str(&raw)
            .map_err(|e| ClassifierError::Manifest(format!("{}: {}", path.display(), e)))?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.feature_count != FEATURE_COUNT {
            return Err(ClassifierError::Manifest(format!(
                "model expects {} features, layout has {}",
                self.feature_count, FEATURE_COUNT
            )));
        }

        if let Some(hash) = self.layout_hash {
            if hash != layout_hash() {
                return Err(ClassifierError::LayoutMismatch {
                    expected: layout_hash(),
                    actual: hash,
                });
            }
        }

        if !self.classes.iter().any(|c| c == NORMAL_LABEL) {
            return Err(ClassifierError::Manifest(format!(
                "classes must include '{}'",
                NORMAL_LABEL
            )));
        }

        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = self.classes.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ClassifierError::Manifest(format!("duplicate class '{}'", dup)));
        }

        Ok(())
    }

    /// No-op when the manifest carries no checksum
    pub fn verify_checksum(&self, model_bytes: &[u8]) -> Result<(), ClassifierError> {
        let Some(expected) = &self.sha256 else {
            return Ok(());
        };

        let actual = sha256_hex(model_bytes);
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(ClassifierError::ChecksumMismatch {
                expected: expected.clone(),
                actual,
            });
        }
        Ok(())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
