//! ESP Risk Assessment API - entry point

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use esp_risk_core::{DriftThresholdTable, OnnxClassifier, RiskConfig, RiskEngine};
use esp_risk_server::{create_router, init_tracing, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    // Load configuration
    let config = Config::from_env();

    tracing::info!("ESP Risk API starting ({})...", config.environment);

    // Model is loaded once; the server does not start without it
    let classifier = OnnxClassifier::load(&config.model_path, &config.manifest_path)
        .with_context(|| format!("Model or manifest not loadable: {}", config.model_path.display()))?;

    let engine = RiskEngine::new(RiskConfig {
        drift: DriftThresholdTable::default(),
        policy: config.risk_policy(),
    })?;

    let state = AppState::new(engine, Arc::new(classifier));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
