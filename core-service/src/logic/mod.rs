//! Logic Module - Engines
//!
//! - `features/` - Feature layout and vector
//! - `drift/` - Raw feature drift against engineering bounds
//! - `risk/` - Tier policy, resolver, engine
//! - `model/` - Classifier seam (ONNX)

pub mod features;
pub mod drift;
pub mod risk;
pub mod model;
