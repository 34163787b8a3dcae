use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use musebot_db::DbPool;
use musebot_events::CallbackDelivery;
use musebot_worker::state::WorkerState;
use tokio_util::task::TaskTracker;

pub async fn seeded_pool() -> DbPool {
    let pool = musebot_db::create_memory_pool().await.unwrap();
    musebot_db::run_migrations(&pool).await.unwrap();
    sqlx::raw_sql(include_str!("../../../db/fixtures/catalogue.sql"))
        .execute(&pool)
        .await
        .unwrap();
    pool
}

/// Collected webhook bodies.
pub type Received = Arc<Mutex<Vec<serde_json::Value>>>;

/// Start a stand-in for the API webhook and return its URL.
pub async fn callback_sink() -> (String, Received) {
    let received = Received::default();
    let app = Router::new()
        .route(
            "/webhook/artist-result",
            post(
                |State(received): State<Received>, Json(body): Json<serde_json::Value>| async move {
                    received.lock().unwrap().push(body);
                    Json(serde_json::json!({ "status": "received" }))
                },
            ),
        )
        .with_state(Arc::clone(&received));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/webhook/artist-result"), received)
}

pub fn worker_state(pool: DbPool, callback_url: &str) -> WorkerState {
    WorkerState {
        pool,
        delivery: Arc::new(
            CallbackDelivery::new(reqwest::Client::new())
                .with_retry_delays(vec![Duration::from_millis(10)]),
        ),
        default_callback_url: Arc::from(callback_url),
        tasks: TaskTracker::new(),
    }
}
