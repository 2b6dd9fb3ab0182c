//! Configuration module

use std::env;
use std::path::PathBuf;

use esp_risk_core::constants::{get_model_path, DEFAULT_RED_THRESHOLD};
use esp_risk_core::logic::model::ModelManifest;
use esp_risk_core::logic::risk::{DevelopingFaultRule, RiskPolicy};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Trained classifier (ONNX)
    pub model_path: PathBuf,

    /// Label encoder classes + integrity checks
    pub manifest_path: PathBuf,

    /// Fault probability above this = RED
    pub red_threshold: f64,

    /// YELLOW-tier probability rule
    pub developing_fault: DevelopingFaultRule,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let model_path = PathBuf::from(get_model_path());
        Self::from_lookup(model_path, |key| env::var(key).ok())
    }

    fn from_lookup(model_path: PathBuf, get: impl Fn(&str) -> Option<String>) -> Self {
        let manifest_path = get("MODEL_MANIFEST_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| ModelManifest::path_for(&model_path));

        let red_threshold = get("RED_THRESHOLD")
            .and_then(|v| match v.parse::<f64>() {
                Ok(t) if is_probability(t) => Some(t),
                _ => {
                    tracing::warn!("Ignoring invalid RED_THRESHOLD '{}'", v);
                    None
                }
            })
            .unwrap_or(DEFAULT_RED_THRESHOLD);

        let developing_fault = get("DEVELOPING_FAULT_RULE")
            .and_then(|v| match v.parse::<DevelopingFaultRule>() {
                Ok(rule) if is_probability(rule.threshold()) => Some(rule),
                Ok(rule) => {
                    tracing::warn!("Ignoring DEVELOPING_FAULT_RULE '{}': threshold outside [0, 1]", rule);
                    None
                }
                Err(e) => {
                    tracing::warn!("Ignoring DEVELOPING_FAULT_RULE: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        Self {
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_path,
            manifest_path,
            red_threshold,
            developing_fault,

            environment: get("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    pub fn risk_policy(&self) -> RiskPolicy {
        RiskPolicy {
            red_threshold: self.red_threshold,
            developing_fault: self.developing_fault,
        }
    }
}

fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(PathBuf::from(get_model_path()), |_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(PathBuf::from("models/esp.onnx"), |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.manifest_path, PathBuf::from("models/esp.json"));
        assert_eq!(config.risk_policy(), RiskPolicy::default());
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "9090"),
            ("MODEL_MANIFEST_PATH", "/etc/esp/classes.json"),
            ("RED_THRESHOLD", "0.9"),
            ("DEVELOPING_FAULT_RULE", "normal_below:0.9"),
            ("ENVIRONMENT", "production"),
        ]);
        assert_eq!(config.port, 9090);
        assert_eq!(config.manifest_path, PathBuf::from("/etc/esp/classes.json"));
        assert_eq!(config.red_threshold, 0.9);
        assert_eq!(config.developing_fault, DevelopingFaultRule::NormalProbabilityBelow(0.9));
        assert_eq!(config.environment, "production");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config(&[
            ("PORT", "http"),
            ("RED_THRESHOLD", "high"),
            ("DEVELOPING_FAULT_RULE", "margin:0.2"),
        ]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.red_threshold, DEFAULT_RED_THRESHOLD);
        assert_eq!(config.developing_fault, DevelopingFaultRule::default());
    }

    #[test]
    fn test_out_of_range_thresholds_fall_back() {
        for red in ["1.5", "-0.1", "NaN"] {
            let config = config(&[("RED_THRESHOLD", red), ("DEVELOPING_FAULT_RULE", "normal_below:2")]);
            assert_eq!(config.red_threshold, DEFAULT_RED_THRESHOLD);
            assert_eq!(config.developing_fault, DevelopingFaultRule::default());
            assert!(config.risk_policy().validate().is_ok());
        }
    }
}
