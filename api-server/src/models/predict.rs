//! Prediction request model

use serde::{Deserialize, Serialize};
use validator::Validate;

use esp_risk_core::logic::features::FEATURE_COUNT;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    /// Feature values in layout order
    #[validate(length(equal = 7))]
    pub features: Vec<f64>,
}

impl PredictRequest {
    /// Message returned to the client on a length mismatch
    pub fn count_error(&self) -> String {
        format!(
            "Expected {} features, but received {}",
            FEATURE_COUNT,
            self.features.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_validation() {
        let ok = PredictRequest { features: vec![-1.0, 0.2, 0.3, 0.1, 0.8, 0.4, 0.3] };
        assert!(ok.validate().is_ok());

        let short = PredictRequest { features: vec![0.1; 6] };
        assert!(short.validate().is_err());
        assert_eq!(short.count_error(), "Expected 7 features, but received 6");
    }
}
