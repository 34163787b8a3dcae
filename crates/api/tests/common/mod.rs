use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use musebot_api::config::ServerConfig;
use musebot_api::dispatch::{ArtistDispatcher, DispatchMode};
use musebot_api::router::build_app_router;
use musebot_api::state::AppState;
use musebot_core::{ArtistKey, ResultStore};
use musebot_db::DbPool;
use musebot_llm::LlmClient;

/// Build a test `ServerConfig` with the queue disabled and no LLM.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        run_migrations: true,
        queue_enabled: false,
        queue_url: "http://127.0.0.1:9/e/test".to_string(),
        callback_base_url: "http://localhost:4000".to_string(),
        llm: None,
    }
}

/// In-memory catalogue with the schema applied and the test fixture loaded.
pub async fn seeded_pool() -> DbPool {
    let pool = musebot_db::create_memory_pool().await.unwrap();
    musebot_db::run_migrations(&pool).await.unwrap();
    sqlx::raw_sql(include_str!("../../../db/fixtures/catalogue.sql"))
        .execute(&pool)
        .await
        .unwrap();
    pool
}

/// Stands in for the queue: records keys and reports them as queued,
/// leaving the entries pending until a webhook arrives.
#[derive(Default)]
pub struct RecordingDispatcher {
    pub keys: Mutex<Vec<String>>,
}

#[async_trait]
impl ArtistDispatcher for RecordingDispatcher {
    async fn dispatch(&self, key: &ArtistKey) -> DispatchMode {
        self.keys.lock().unwrap().push(key.as_str().to_string());
        DispatchMode::Queue
    }
}

pub fn test_state(
    pool: DbPool,
    results: Arc<ResultStore>,
    dispatcher: Arc<dyn ArtistDispatcher>,
    llm: Option<Arc<LlmClient>>,
) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        results,
        dispatcher,
        llm,
    }
}

/// Full router with the production middleware stack.
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

/// App wired to a [`RecordingDispatcher`], returned alongside it.
pub async fn queued_app() -> (Router, Arc<RecordingDispatcher>) {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let state = test_state(
        seeded_pool().await,
        Arc::new(ResultStore::new()),
        dispatcher.clone(),
        None,
    );
    (build_test_app(state), dispatcher)
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}
