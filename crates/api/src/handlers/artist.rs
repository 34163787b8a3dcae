//! Artist lookup lifecycle: trigger, poll, and the worker's webhook.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use musebot_core::{ArtistCallback, ArtistKey, LookupReport};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::dispatch::DispatchMode;
use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /trigger-artist`.
#[derive(Debug, Deserialize)]
pub struct TriggerRequest {
    #[serde(default)]
    pub artist_name: String,
}

#[derive(Debug, Serialize)]
pub struct TriggerResponse {
    pub status: &'static str,
    /// Normalized key to poll with.
    pub artist_name: String,
    pub mode: DispatchMode,
    pub message: String,
}

/// Query of `GET /get-artist-results`.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    #[serde(default)]
    pub artist_name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Mark `key` pending and hand it to the configured dispatcher.
///
/// A previous result for the same key is overwritten.
pub async fn start_lookup(state: &AppState, key: &ArtistKey) -> DispatchMode {
    state.results.mark_pending(key).await;
    state.dispatcher.dispatch(key).await
}

/// POST /trigger-artist
pub async fn trigger_artist(
    State(state): State<AppState>,
    payload: Result<Json<TriggerRequest>, JsonRejection>,
) -> AppResult<Json<TriggerResponse>> {
    let Json(input) = payload?;
    let key = ArtistKey::parse(&input.artist_name)?;

    let mode = start_lookup(&state, &key).await;
    tracing::info!(artist_name = %key, ?mode, "Artist lookup triggered");

    let message = match mode {
        DispatchMode::Queue => format!("Lookup for '{key}' has been queued"),
        DispatchMode::Local => format!("Lookup for '{key}' was processed locally"),
    };

    Ok(Json(TriggerResponse {
        status: "queued",
        artist_name: key.as_str().to_string(),
        mode,
        message,
    }))
}

/// GET /get-artist-results?artist_name=
pub async fn get_artist_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> AppResult<Json<LookupReport>> {
    let key = ArtistKey::parse(&query.artist_name)?;

    let report = match state.results.get(&key).await {
        Some(entry) => LookupReport::from_entry(&entry),
        None => LookupReport::untriggered(&key),
    };
    tracing::debug!(artist_name = %key, status = ?report.status, "Artist results polled");

    Ok(Json(report))
}

/// POST /webhook/artist-result
///
/// Stores the worker's outcome unconditionally, whether or not a pending
/// entry exists.
pub async fn artist_result_webhook(
    State(state): State<AppState>,
    payload: Result<Json<ArtistCallback>, JsonRejection>,
) -> AppResult<Json<serde_json::Value>> {
    let Json(callback) = payload?;
    let key = ArtistKey::parse(&callback.artist_name)?;

    let outcome = callback.into_outcome();
    let status = outcome.status();
    let previous = state.results.resolve(&key, outcome).await;
    tracing::info!(artist_name = %key, ?status, ?previous, "Artist result received");

    Ok(Json(json!({ "status": "received" })))
}
