mod common;

use assert_matches::assert_matches;
use musebot_core::LookupOutcome;
use musebot_events::QueueEvent;
use musebot_worker::jobs::get_artist;

#[tokio::test]
async fn known_artist_is_a_success() {
    let pool = common::seeded_pool().await;

    let outcome = get_artist::run_lookup(&pool, "queen").await;

    assert_matches!(outcome, LookupOutcome::Success(r) if r.name == "Queen" && r.albums.len() == 3);
}

#[tokio::test]
async fn unknown_artist_is_not_found_with_message() {
    let pool = common::seeded_pool().await;

    let outcome = get_artist::run_lookup(&pool, "Nonexistent Band").await;

    assert_eq!(
        outcome,
        LookupOutcome::NotFound {
            message: Some(
                "No artist found matching 'Nonexistent Band'\n\nDid you mean one of these?\n• The Silent Band"
                    .into()
            )
        }
    );
}

#[tokio::test]
async fn miss_without_similar_names_has_plain_message() {
    let pool = common::seeded_pool().await;

    let outcome = get_artist::run_lookup(&pool, "Zz Xq").await;

    assert_eq!(outcome, LookupOutcome::no_match("Zz Xq"));
}

#[tokio::test]
async fn blank_name_is_an_error() {
    let pool = common::seeded_pool().await;

    assert_matches!(
        get_artist::run_lookup(&pool, "  ").await,
        LookupOutcome::Error { .. }
    );
}

#[tokio::test]
async fn database_failure_becomes_generic_error() {
    let pool = common::seeded_pool().await;
    pool.close().await;

    assert_eq!(
        get_artist::run_lookup(&pool, "queen").await,
        LookupOutcome::internal_error()
    );
}

#[tokio::test]
async fn handle_posts_to_the_event_callback_url() {
    let (url, received) = common::callback_sink().await;
    let state = common::worker_state(common::seeded_pool().await, "http://127.0.0.1:9/unused");

    get_artist::handle(&state, &QueueEvent::get_artist("u2", url)).await;

    let bodies = received.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["artist_name"], "u2");
    assert_eq!(bodies[0]["status"], "success");
    assert_eq!(bodies[0]["name"], "U2");
    assert_eq!(bodies[0]["total_tracks"], 5);
    assert_eq!(bodies[0]["albums"][0]["title"], "Achtung Baby");
}

#[tokio::test]
async fn handle_falls_back_to_default_callback_url() {
    let (url, received) = common::callback_sink().await;
    let state = common::worker_state(common::seeded_pool().await, &url);
    let event = QueueEvent::new("get.artist")
        .with_data(serde_json::json!({ "artist_name": "Nonexistent Band" }));

    get_artist::handle(&state, &event).await;

    let bodies = received.lock().unwrap();
    assert_eq!(bodies[0]["status"], "not_found");
    assert!(bodies[0].get("albums").is_none());
}
