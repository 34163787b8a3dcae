//! How a triggered lookup gets executed.
//!
//! [`QueueDispatcher`] publishes a `get.artist` event and lets the worker
//! answer through the webhook; when the queue is unreachable it falls back
//! to [`LocalDispatcher`], which runs the lookup in-process and resolves the
//! Result Store entry before returning.

use std::sync::Arc;

use async_trait::async_trait;
use musebot_core::{ArtistKey, ResultStore};
use musebot_events::{EventQueueClient, QueueEvent};
use serde::Serialize;

use crate::config::ServerConfig;

/// Which path a lookup actually took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    Queue,
    Local,
}

/// Starts a lookup for a key that is already marked pending.
#[async_trait]
pub trait ArtistDispatcher: Send + Sync {
    async fn dispatch(&self, key: &ArtistKey) -> DispatchMode;
}

// ---------------------------------------------------------------------------
// Local
// ---------------------------------------------------------------------------

/// Runs the catalogue lookup in the request and stores the outcome.
pub struct LocalDispatcher {
    pool: musebot_db::DbPool,
    results: Arc<ResultStore>,
}

impl LocalDispatcher {
    pub fn new(pool: musebot_db::DbPool, results: Arc<ResultStore>) -> Self {
        Self { pool, results }
    }
}

#[async_trait]
impl ArtistDispatcher for LocalDispatcher {
    async fn dispatch(&self, key: &ArtistKey) -> DispatchMode {
        let outcome = musebot_worker::jobs::get_artist::run_lookup(&self.pool, key.as_str()).await;
        let status = outcome.status();
        self.results.resolve(key, outcome).await;
        tracing::info!(artist_name = %key, ?status, "Lookup resolved locally");
        DispatchMode::Local
    }
}

// ---------------------------------------------------------------------------
// Queue
// ---------------------------------------------------------------------------

/// Publishes to the external queue, falling back to a local lookup.
pub struct QueueDispatcher {
    queue: EventQueueClient,
    callback_url: String,
    fallback: LocalDispatcher,
}

impl QueueDispatcher {
    pub fn new(queue: EventQueueClient, callback_url: String, fallback: LocalDispatcher) -> Self {
        Self {
            queue,
            callback_url,
            fallback,
        }
    }
}

#[async_trait]
impl ArtistDispatcher for QueueDispatcher {
    async fn dispatch(&self, key: &ArtistKey) -> DispatchMode {
        let event = QueueEvent::get_artist(key.as_str(), self.callback_url.as_str());
        match self.queue.publish(&event).await {
            Ok(()) => {
                tracing::info!(artist_name = %key, queue_url = %self.queue.url(), "Lookup queued");
                DispatchMode::Queue
            }
            Err(e) => {
                tracing::warn!(
                    artist_name = %key,
                    error = %e,
                    "Queue unavailable, falling back to local lookup",
                );
                self.fallback.dispatch(key).await
            }
        }
    }
}

/// Pick the dispatcher for this configuration.
pub fn from_config(
    config: &ServerConfig,
    pool: musebot_db::DbPool,
    results: Arc<ResultStore>,
    http: reqwest::Client,
) -> Arc<dyn ArtistDispatcher> {
    let local = LocalDispatcher::new(pool, results);
    if !config.queue_enabled {
        return Arc::new(local);
    }
    Arc::new(QueueDispatcher::new(
        EventQueueClient::with_client(http, config.queue_url.clone()),
        config.callback_url(),
        local,
    ))
}
