//! Prediction handler

use axum::{extract::State, Json};
use validator::Validate;

use esp_risk_core::{Assessment, FeatureVector};

use crate::models::PredictRequest;
use crate::{AppError, AppResult, AppState};

/// Accepts ESP feature data and returns a risk assessment
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<Assessment>> {
    if req.validate().is_err() {
        return Err(AppError::ValidationError(req.count_error()));
    }
    let features = FeatureVector::try_from(req.features.as_slice())?;

    // Inference holds the session lock; keep it off the async workers
    let classifier = state.classifier.clone();
    let probabilities = tokio::task::spawn_blocking(move || classifier.predict_proba(&features))
        .await
        .map_err(|e| AppError::InternalError(format!("Inference task failed: {}", e)))??;

    let assessment = state.engine.assess(&features, &probabilities)?;

    tracing::info!(
        alert_level = %assessment.tier,
        normal = probabilities.normal(),
        "ESP assessed"
    );

    Ok(Json(assessment))
}
