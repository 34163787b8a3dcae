use axum::routing::post;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// ```text
/// POST /message -> post_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/message", post(chat::post_message))
}
