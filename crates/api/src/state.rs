use std::sync::Arc;

use musebot_core::ResultStore;
use musebot_llm::LlmClient;

use crate::config::ServerConfig;
use crate::dispatch::ArtistDispatcher;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything shared sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Catalogue connection pool.
    pub pool: musebot_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Lookup results keyed by normalized artist name.
    pub results: Arc<ResultStore>,
    /// How triggered lookups are executed (queue or in-process).
    pub dispatcher: Arc<dyn ArtistDispatcher>,
    /// Completion client; `None` when no API key is configured.
    pub llm: Option<Arc<LlmClient>>,
}
