//! Risk Module
//!
//! Turns classifier probabilities plus drift findings into an alert tier.
//! This is the CORE STEP - where GREEN/YELLOW/RED is decided.
//!
//! ## Structure
//! - `types`: AlertTier, Assessment
//! - `probabilities`: ProbabilityDistribution with a typed "Normal" label
//! - `rules`: RiskPolicy and the developing fault rule
//! - `resolver`: Tier decision logic
//! - `engine`: RiskEngine, config + detector + resolver
//!
//! ## Usage
//! ```ignore
//! use esp_risk_core::logic::risk::{RiskEngine, RiskConfig, AlertTier};
//!
//! let engine = RiskEngine::new(RiskConfig::default())?;
//! let assessment = engine.assess(&features, &probabilities)?;
//! match assessment.tier {
//!     AlertTier::Green => println!("Safe"),
//!     AlertTier::Yellow => println!("Review"),
//!     AlertTier::Red => println!("Maintenance needed"),
//! }
//! ```

pub mod types;
pub mod probabilities;
pub mod rules;
pub mod resolver;
pub mod engine;

pub use types::{AlertTier, Assessment};
pub use probabilities::ProbabilityDistribution;
pub use rules::{DevelopingFaultRule, RiskPolicy};
pub use resolver::resolve;
pub use engine::{RiskConfig, RiskEngine};
