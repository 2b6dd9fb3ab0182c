//! ESP Risk Assessment API
//!
//! Thin HTTP layer over `esp-risk-core`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    ESP RISK API                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌─────────────────┐  │
//! │  │  Router   │──►│  Classifier  │──►│   RiskEngine    │  │
//! │  │  (Axum)   │   │  (ONNX)      │   │  drift + tiers  │  │
//! │  └───────────┘   └──────────────┘   └─────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use esp_risk_core::{Classifier, RiskEngine};

pub use config::Config;
pub use error::{AppError, AppResult};

/// Shared application state
///
/// Engine and classifier are built once in `main` and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RiskEngine>,
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(engine: RiskEngine, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            engine: Arc::new(engine),
            classifier,
        }
    }
}

/// Initialize logging. `LOG_FORMAT=json` switches to JSON lines; `log`
/// records from the core are bridged in by `tracing-subscriber`.
pub fn init_tracing() {
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "esp_risk_server=debug,esp_risk_core=info,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/api/v1/thresholds", get(handlers::thresholds::get))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
