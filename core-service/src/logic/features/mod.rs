//! Features Module - Feature layout and vector
//!
//! The ESP feature vector is computed upstream; this module only fixes its
//! shape and naming.

pub mod layout;
pub mod vector;

// Re-export common types
pub use layout::{feature_index, feature_name, layout_hash, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use vector::FeatureVector;
