use axum::routing::{get, post};
use axum::Router;

use crate::config::WEBHOOK_PATH;
use crate::handlers::artist;
use crate::state::AppState;

/// Artist lookup routes.
///
/// ```text
/// POST /trigger-artist        -> trigger_artist
/// GET  /get-artist-results    -> get_artist_results
/// POST /webhook/artist-result -> artist_result_webhook
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trigger-artist", post(artist::trigger_artist))
        .route("/get-artist-results", get(artist::get_artist_results))
        .route(WEBHOOK_PATH, post(artist::artist_result_webhook))
}
