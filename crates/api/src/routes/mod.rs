pub mod artist;
pub mod chat;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (everything except `/health`).
///
/// ```text
/// POST /trigger-artist          start an artist lookup
/// GET  /get-artist-results      poll a lookup by artist_name
/// POST /webhook/artist-result   worker callback
/// POST /message                 conversational endpoint
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new().merge(artist::router()).merge(chat::router())
}
