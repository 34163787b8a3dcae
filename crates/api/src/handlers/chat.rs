//! Conversational endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use musebot_core::intent::{detect_intent, ChatIntent};
use musebot_core::ArtistKey;
use musebot_llm::MUSIC_ASSISTANT_PROMPT;
use serde::{Deserialize, Serialize};

use crate::dispatch::DispatchMode;
use crate::error::{AppError, AppResult};
use crate::handlers::artist::start_lookup;
use crate::{catalogue, reports};
use crate::state::AppState;

pub const GREETING_REPLY: &str = "Hi! I'm your music assistant. Ask me \"who is Queen?\" to \
look up an artist, \"who sang Black Dog?\" for a song, \"list the tracks on album IV\" for an \
album, \"top 5 artists\" or \"top genres\" for catalogue rankings, or anything else about music.";

pub const LLM_FAILURE_REPLY: &str =
    "Sorry, I'm having trouble answering right now. Please try again in a moment.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Ok,
    Error,
}

/// A lookup started on the user's behalf; poll `/get-artist-results` with
/// `artist_name`.
#[derive(Debug, Serialize)]
pub struct ArtistLookupHint {
    pub artist_name: String,
    pub mode: DispatchMode,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub response: String,
    pub status: ReplyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_lookup: Option<ArtistLookupHint>,
}

impl MessageResponse {
    fn ok(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: ReplyStatus::Ok,
            artist_lookup: None,
        }
    }

    fn error(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: ReplyStatus::Error,
            artist_lookup: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /message
///
/// LLM trouble becomes an `error` reply with HTTP 200. A failed catalogue
/// query is a 500.
pub async fn post_message(
    State(state): State<AppState>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(input) = payload?;
    let text = input.message.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    let intent = detect_intent(text);
    tracing::debug!(?intent, "Detected chat intent");

    let reply = match intent {
        ChatIntent::Greeting => MessageResponse::ok(GREETING_REPLY),
        ChatIntent::ArtistLookup { artist_name } => {
            let key = ArtistKey::parse(&artist_name)?;
            let mode = start_lookup(&state, &key).await;
            MessageResponse {
                response: format!(
                    "I'm looking up information about {artist_name}. The results will appear in a moment."
                ),
                status: ReplyStatus::Ok,
                artist_lookup: Some(ArtistLookupHint {
                    artist_name: key.as_str().to_string(),
                    mode,
                }),
            }
        }
        ChatIntent::SongLookup { title } => {
            MessageResponse::ok(catalogue::song_info(&state.pool, &title).await?)
        }
        ChatIntent::TrackByArtist { title, artist_name } => MessageResponse::ok(
            catalogue::track_by_artist(&state.pool, &title, &artist_name).await?,
        ),
        ChatIntent::AlbumTracks { album } => {
            MessageResponse::ok(catalogue::album_tracks(&state.pool, &album).await?)
        }
        ChatIntent::Report { kind, limit } => {
            MessageResponse::ok(reports::render(&state.pool, kind, limit).await?)
        }
        ChatIntent::Freeform => llm_reply(&state, text).await,
    };

    tracing::info!(status = ?reply.status, "Message handled");
    Ok(Json(reply))
}

async fn llm_reply(state: &AppState, text: &str) -> MessageResponse {
    let Some(llm) = &state.llm else {
        tracing::warn!("LLM not configured, cannot answer free-form message");
        return MessageResponse::error(LLM_FAILURE_REPLY);
    };

    match llm.complete(MUSIC_ASSISTANT_PROMPT, text).await {
        Ok(answer) => MessageResponse::ok(answer),
        Err(e) => {
            tracing::error!(model = %llm.model(), error = %e, "LLM completion failed");
            MessageResponse::error(LLM_FAILURE_REPLY)
        }
    }
}
