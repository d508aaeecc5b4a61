//! KAPREKAR API /v1: REST endpoints
pub mod handlers;
pub mod metrics;
pub mod middleware;

use axum::{
    routing::{get, post},
    Router,
};
use kaprekar_core::RoutineConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use metrics::Metrics;

/// Default listen address, overridable with `KAPREKAR_ADDR`
pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";

#[derive(Clone)]
pub struct AppState {
    pub config: RoutineConfig,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: RoutineConfig) -> Result<Self, prometheus::Error> {
        Ok(Self {
            config,
            metrics: Arc::new(Metrics::new()?),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/run", post(handlers::run_body))
        .route("/v1/run/{input}", get(handlers::run_path))
        .route("/v1/verify", post(handlers::verify))
        .route("/v1/survey", get(handlers::survey))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: &str, config: RoutineConfig) -> anyhow::Result<()> {
    let app = create_app(AppState::new(config)?);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(max_steps = config.max_steps, "Kaprekar API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
