//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;

use esp_risk_core::{ClassifierError, RiskError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Request errors
    #[error("{0}")]
    ValidationError(String),

    // Engine errors (distribution contract, feature count)
    #[error(transparent)]
    Risk(#[from] RiskError),

    // Model errors
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    // Generic errors
    #[error("{0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Risk(err @ RiskError::InvalidFeatureCount { .. }) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Risk(err) => {
                tracing::error!("Classifier output rejected by risk engine: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::Classifier(ClassifierError::Distribution(err)) => {
                tracing::error!("Classifier output rejected: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::Classifier(err) => {
                tracing::error!("Classifier error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Model inference failed".to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::ValidationError("bad".into()), StatusCode::BAD_REQUEST),
            (
                RiskError::InvalidFeatureCount { expected: 7, actual: 3 }.into(),
                StatusCode::BAD_REQUEST,
            ),
            (RiskError::EmptyFaultSet.into(), StatusCode::INTERNAL_SERVER_ERROR),
            (RiskError::MissingNormalLabel.into(), StatusCode::INTERNAL_SERVER_ERROR),
            (
                ClassifierError::Inference("boom".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
