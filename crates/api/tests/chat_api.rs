//! Conversational endpoint.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::{body_json, post_json};
use musebot_api::handlers::chat::{GREETING_REPLY, LLM_FAILURE_REPLY};
use musebot_core::ResultStore;
use musebot_llm::{LlmClient, LlmConfig};
use serde_json::json;

/// Serve `app` on an ephemeral port and return an LLM client pointed at it.
async fn llm_stub(app: Router) -> Arc<LlmClient> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Arc::new(LlmClient::new(LlmConfig {
        base_url: format!("http://{addr}/v1"),
        api_key: "sk-test".into(),
        model: "gpt-3.5-turbo".into(),
        timeout: Duration::from_secs(5),
        temperature: 0.0,
    }))
}

async fn app_with_llm(llm: Arc<LlmClient>) -> Router {
    let state = common::test_state(
        common::seeded_pool().await,
        Arc::new(ResultStore::new()),
        Arc::new(common::RecordingDispatcher::default()),
        Some(llm),
    );
    common::build_test_app(state)
}

#[tokio::test]
async fn greeting_gets_canned_reply() {
    let (app, dispatcher) = common::queued_app().await;

    let json = body_json(post_json(app, "/message", json!({ "message": "Hello!" })).await).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["response"], GREETING_REPLY);
    assert!(json.get("artist_lookup").is_none());
    assert!(dispatcher.keys.lock().unwrap().is_empty());
}

#[tokio::test]
async fn who_is_starts_a_lookup() {
    let (app, dispatcher) = common::queued_app().await;

    let json = body_json(post_json(app.clone(), "/message", json!({ "message": "Who is Queen?" })).await).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["artist_lookup"]["artist_name"], "queen");
    assert_eq!(json["artist_lookup"]["mode"], "queue");
    assert_eq!(*dispatcher.keys.lock().unwrap(), vec!["queen".to_string()]);

    let json = body_json(common::get(app, "/get-artist-results?artist_name=queen").await).await;
    assert_eq!(json["status"], "pending");
}

#[tokio::test]
async fn report_is_answered_from_the_catalogue() {
    let (app, _) = common::queued_app().await;

    let json = body_json(post_json(app, "/message", json!({ "message": "Show me the top 3 artists" })).await).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(
        json["response"],
        "Top 3 Artists with Most Tracks:\n1. Queen: 5 tracks\n2. U2: 5 tracks\n3. Led Zeppelin: 4 tracks\n"
    );
}

#[tokio::test]
async fn freeform_without_llm_is_an_error_reply() {
    let (app, _) = common::queued_app().await;

    let response = post_json(app, "/message", json!({ "message": "Why do people like vinyl?" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["response"], LLM_FAILURE_REPLY);
}

#[tokio::test]
async fn freeform_returns_llm_text_unmodified() {
    let llm = llm_stub(Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            Json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "Warmth, mostly.\n\n*Also* the artwork." } }]
            }))
        }),
    ))
    .await;
    let app = app_with_llm(llm).await;

    let json = body_json(post_json(app, "/message", json!({ "message": "Why do people like vinyl?" })).await).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["response"], "Warmth, mostly.\n\n*Also* the artwork.");
}

#[tokio::test]
async fn llm_failure_is_an_error_reply() {
    let llm = llm_stub(Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;
    let app = app_with_llm(llm).await;

    let response = post_json(app, "/message", json!({ "message": "Why do people like vinyl?" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["response"], LLM_FAILURE_REPLY);
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let (app, _) = common::queued_app().await;

    let response = post_json(app, "/message", json!({ "message": "  " })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], "error");
}

// ---------------------------------------------------------------------------
// Lookup phrasings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tell_me_about_and_bare_artist_start_lookups() {
    let (app, dispatcher) = common::queued_app().await;

    for message in ["Tell me about Queen", "artist U2"] {
        let json = body_json(post_json(app.clone(), "/message", json!({ "message": message })).await).await;
        assert_eq!(json["status"], "ok", "{message}");
        assert!(json["artist_lookup"].is_object(), "{message}");
    }

    assert_eq!(
        *dispatcher.keys.lock().unwrap(),
        vec!["queen".to_string(), "u2".to_string()]
    );
}

#[tokio::test]
async fn accented_name_starts_a_lookup() {
    let (app, dispatcher) = common::queued_app().await;

    let json = body_json(post_json(app, "/message", json!({ "message": "who is Björk?" })).await).await;

    assert_eq!(json["artist_lookup"]["artist_name"], "björk");
    assert_eq!(*dispatcher.keys.lock().unwrap(), vec!["björk".to_string()]);
}

#[tokio::test]
async fn music_question_is_not_a_report() {
    let (app, dispatcher) = common::queued_app().await;

    let json = body_json(
        post_json(app, "/message", json!({ "message": "Which artist influenced the Beatles?" })).await,
    )
    .await;

    // No LLM configured, so the question ends in the apology rather than a ranking.
    assert_eq!(json["status"], "error");
    assert_eq!(json["response"], LLM_FAILURE_REPLY);
    assert!(dispatcher.keys.lock().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Songs, tracks and albums
// ---------------------------------------------------------------------------

#[tokio::test]
async fn who_sang_answers_from_the_catalogue() {
    let (app, dispatcher) = common::queued_app().await;

    let json = body_json(
        post_json(app, "/message", json!({ "message": "Who sang Bohemian Rhapsody?" })).await,
    )
    .await;

    assert_eq!(json["status"], "ok");
    assert_eq!(
        json["response"],
        "**Bohemian Rhapsody**\n\nArtist: Queen\nAlbum: Greatest Hits\nGenre: Rock\n\
         Composer: Freddie Mercury\nDuration: 5:54\n"
    );
    assert!(json.get("artist_lookup").is_none());
    assert!(dispatcher.keys.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_song_is_reported() {
    let (app, _) = common::queued_app().await;

    let json = body_json(
        post_json(app, "/message", json!({ "message": "who sang yellow submarine" })).await,
    )
    .await;

    assert_eq!(json["status"], "ok");
    assert_eq!(
        json["response"],
        "I couldn't find any song matching 'yellow submarine' in our database."
    );
}

#[tokio::test]
async fn album_tracks_are_listed_with_durations() {
    let (app, _) = common::queued_app().await;

    let json = body_json(
        post_json(app, "/message", json!({ "message": "List the tracks on album IV" })).await,
    )
    .await;

    assert_eq!(
        json["response"],
        "**IV** by Led Zeppelin\n\n• Black Dog (4:56)\n• Rock and Roll (3:40)\n\
         • The Battle of Evermore (5:51)\n• Stairway to Heaven (8:02)\n"
    );
}

#[tokio::test]
async fn track_by_artist_includes_album_position() {
    let (app, _) = common::queued_app().await;

    let json = body_json(
        post_json(
            app,
            "/message",
            json!({ "message": "Tell me about Stairway to Heaven by Led Zeppelin" }),
        )
        .await,
    )
    .await;

    let text = json["response"].as_str().unwrap();
    assert!(text.starts_with("**Stairway to Heaven** by Led Zeppelin\n\nAlbum: IV\n"));
    assert!(text.contains("Composer: Jimmy Page\n"));
    assert!(text.contains("Duration: 8:02\n"));
    assert!(text.contains("Price: $0.99\n"));
    assert!(text.ends_with("Track #4 on the album\n"));
}

#[tokio::test]
async fn catalogue_failure_is_an_internal_error() {
    let pool = common::seeded_pool().await;
    let state = common::test_state(
        pool.clone(),
        Arc::new(ResultStore::new()),
        Arc::new(common::RecordingDispatcher::default()),
        None,
    );
    let app = common::build_test_app(state);
    pool.close().await;

    let response = post_json(app, "/message", json!({ "message": "top 3 artists" })).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "An internal error occurred");
}
