//! Active configuration, for operators and the dashboard

use axum::{extract::State, Json};
use serde::Serialize;

use esp_risk_core::logic::features::LayoutInfo;
use esp_risk_core::RiskConfig;

use crate::AppState;

#[derive(Serialize)]
pub struct ThresholdsResponse {
    layout: LayoutInfo,
    #[serde(flatten)]
    config: RiskConfig,
}

pub async fn get(State(state): State<AppState>) -> Json<ThresholdsResponse> {
    Json(ThresholdsResponse {
        layout: LayoutInfo::current(),
        config: state.engine.config().clone(),
    })
}
