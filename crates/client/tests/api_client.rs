//! `ApiClient` against an in-process stand-in for the API.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use musebot_client::{ApiClient, ClientError};
use musebot_core::poller::{self, PollerConfig, TerminalState};
use musebot_core::LookupStatus;
use serde_json::{json, Value};

/// Answers `pending` for the first `pending_polls` polls, then success.
#[derive(Clone)]
struct FakeApi {
    polls: Arc<AtomicU32>,
    pending_polls: u32,
}

async fn trigger(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let name = body["artist_name"].as_str().unwrap_or_default().trim().to_lowercase();
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "error", "message": "artist_name must not be empty", "code": "VALIDATION_ERROR" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "status": "queued", "artist_name": name, "mode": "queue", "message": "queued" })),
    )
}

async fn results(
    State(api): State<FakeApi>,
    Query(query): Query<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    assert_eq!(query["artist_name"], "queen");
    let n = api.polls.fetch_add(1, Ordering::SeqCst);
    if n < api.pending_polls {
        return Json(json!({ "status": "pending" }));
    }
    Json(json!({
        "status": "success",
        "name": "Queen",
        "total_tracks": 45,
        "albums": [{ "title": "Greatest Hits", "track_count": 17 }],
    }))
}

async fn message(Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body["message"], "who is queen");
    Json(json!({
        "response": "I'm looking up information about queen.",
        "status": "ok",
        "artist_lookup": { "artist_name": "queen", "mode": "queue" },
    }))
}

async fn serve(pending_polls: u32) -> (ApiClient, Arc<AtomicU32>) {
    let api = FakeApi {
        polls: Arc::new(AtomicU32::new(0)),
        pending_polls,
    };
    let polls = Arc::clone(&api.polls);
    let app = Router::new()
        .route("/trigger-artist", post(trigger))
        .route("/get-artist-results", get(results))
        .route("/message", post(message))
        .with_state(api);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (ApiClient::new(format!("http://{addr}/")), polls)
}

fn fast(max_attempts: u32) -> PollerConfig {
    PollerConfig {
        interval: Duration::from_millis(5),
        error_backoff: Duration::from_millis(5),
        max_attempts,
    }
}

#[tokio::test]
async fn trigger_returns_normalized_key() {
    let (client, _) = serve(0).await;

    let ack = client.trigger_artist("  Queen ").await.unwrap();

    assert_eq!(ack.artist_name, "queen");
    assert_eq!(ack.mode, "queue");
}

#[tokio::test]
async fn api_error_message_is_extracted() {
    let (client, _) = serve(0).await;

    let err = client.trigger_artist(" ").await.unwrap_err();

    assert_matches!(err, ClientError::Api { status: 400, ref message } if message == "artist_name must not be empty");
}

#[tokio::test]
async fn poller_runs_to_success_over_http() {
    let (client, polls) = serve(2).await;

    let terminal = poller::run(&client, "queen", fast(30)).await;

    assert_matches!(terminal, TerminalState::Success(r) if r.name == "Queen" && r.total_tracks == 45);
    assert_eq!(polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn poller_times_out_over_http() {
    let (client, polls) = serve(u32::MAX).await;

    let terminal = poller::run(&client, "queen", fast(4)).await;

    assert_eq!(terminal, TerminalState::TimedOut { attempts: 4 });
    assert_eq!(polls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn chat_reply_carries_lookup_hint() {
    let (client, _) = serve(0).await;

    let reply = client.send_message("who is queen").await.unwrap();
    assert!(!reply.is_error());
    let hint = reply.artist_lookup.expect("lookup hint");

    let report = client.artist_results(&hint.artist_name).await.unwrap();
    assert_eq!(report.status, LookupStatus::Success);
}

#[tokio::test]
async fn unreachable_api_is_a_request_error() {
    let client = ApiClient::new("http://127.0.0.1:9");

    assert_matches!(client.artist_results("queen").await, Err(ClientError::Request(_)));
}
