//! Drift Module
//!
//! Flags raw feature readings that fall outside fixed engineering bounds.
//!
//! ## Structure
//! - `types`: Threshold table, bound direction, findings
//! - `detector`: Detection logic

pub mod types;
pub mod detector;

pub use types::{
    BoundDirection,
    DriftFinding,
    DriftThreshold,
    DriftThresholdTable,
    DriftThresholdTableBuilder,
};

pub use detector::detect;
