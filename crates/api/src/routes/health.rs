use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the catalogue database is reachable.
    pub db_healthy: bool,
    /// Whether an LLM API key is configured.
    pub llm_configured: bool,
    /// Whether lookups go through the external queue.
    pub queue_enabled: bool,
}

/// GET /health -- service, database and integration status.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = musebot_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        llm_configured: state.llm.is_some(),
        queue_enabled: state.config.queue_enabled,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
