//! Worker HTTP surface.
//!
//! ```text
//! GET  /            worker info
//! GET  /health      liveness + database check
//! POST /api/events  queue event intake (202, job runs in background)
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use musebot_events::QueueEvent;
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::jobs;
use crate::state::WorkerState;

#[derive(Serialize)]
pub struct WorkerInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub functions: &'static [&'static str],
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db_healthy: bool,
}

/// GET /
async fn info() -> Json<WorkerInfo> {
    Json(WorkerInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        functions: jobs::HANDLED_EVENTS,
    })
}

/// GET /health
async fn health(State(state): State<WorkerState>) -> Json<HealthResponse> {
    let db_healthy = musebot_db::health_check(&state.pool).await.is_ok();
    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        db_healthy,
    })
}

/// POST /api/events
///
/// Acknowledges immediately; the lookup and callback happen on a background
/// task.
async fn receive_event(
    State(state): State<WorkerState>,
    payload: Result<Json<QueueEvent>, JsonRejection>,
) -> (StatusCode, Json<serde_json::Value>) {
    let Json(event) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": "error", "message": rejection.body_text() })),
            );
        }
    };

    let name = event.name.clone();
    let accepted = jobs::spawn(&state, event);
    tracing::info!(event = %name, accepted, "Queue event received");

    let status = if accepted { "accepted" } else { "ignored" };
    (
        StatusCode::ACCEPTED,
        Json(json!({ "status": status, "event": name })),
    )
}

/// Build the worker router.
pub fn router(state: WorkerState) -> Router {
    Router::new()
        .route("/", get(info))
        .route("/health", get(health))
        .route("/api/events", post(receive_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
