//! Central Configuration Constants
//!
//! Single source of truth for all engine defaults.
//! To change a default policy value, only edit this file.

/// Reserved class label for healthy operation
pub const NORMAL_LABEL: &str = "Normal";

/// A fault label above this probability = RED
pub const DEFAULT_RED_THRESHOLD: f64 = 0.85;

/// Top fault probability above this = developing fault (YELLOW)
pub const DEFAULT_DEVELOPING_FAULT_THRESHOLD: f64 = 0.17;

/// Legacy YELLOW variant: Normal probability below this = developing fault
pub const DEFAULT_NORMAL_FLOOR: f64 = 0.90;

/// Rounding slack accepted on classifier probabilities
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Default model artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "final_stacking_model.onnx";

// ============================================
// Action texts (fixed per tier)
// ============================================

pub const RED_ACTION: &str = "ESP at critical condition - initiate corrective maintenance.";
pub const YELLOW_ACTION: &str = "Flag for expert review. Potential for future failure.";
pub const GREEN_ACTION: &str = "Safe for continued deployment.";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}
