use std::sync::Arc;

use musebot_events::CallbackDelivery;
use tokio_util::task::TaskTracker;

/// Shared worker state available to handlers via `State<WorkerState>`.
#[derive(Clone)]
pub struct WorkerState {
    /// Catalogue connection pool.
    pub pool: musebot_db::DbPool,
    /// Posts finished lookups to the API.
    pub delivery: Arc<CallbackDelivery>,
    /// Webhook used when an event carries no callback URL.
    pub default_callback_url: Arc<str>,
    /// In-flight jobs, drained on shutdown.
    pub tasks: TaskTracker,
}
