//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use esp_risk_core::logic::model::{ClassifierStats, ModelMetadata};

use crate::AppState;

#[derive(Serialize)]
pub struct StatusResponse {
    status: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model_loaded: bool,
    classes: Vec<String>,
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    artifact: Option<ModelMetadata>,
    inference: ClassifierStats,
}

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "API is running. POST feature vectors to /predict.",
    })
}

/// The classifier is built before the router, so `model_loaded` only drops
/// to false for a classifier that exposes no classes.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let classes = state.classifier.classes().to_vec();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model_loaded: !classes.is_empty(),
        classes,
        model: state.classifier.name().to_string(),
        artifact: state.classifier.metadata().cloned(),
        inference: state.classifier.stats(),
    })
}
