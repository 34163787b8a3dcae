//! The `get.artist` job: look an artist up and report back.

use musebot_core::{ArtistCallback, LookupOutcome};
use musebot_db::repositories::ArtistRepo;
use musebot_events::{GetArtistData, QueueEvent};

use crate::state::WorkerState;

/// Most "did you mean" names attached to a miss.
const MAX_SUGGESTIONS: usize = 10;

/// Look `artist_name` up in the catalogue and classify the result.
///
/// Never fails: a blank name or a database error becomes an `Error`
/// outcome, a miss becomes `NotFound` with any similar artist names.
pub async fn run_lookup(pool: &musebot_db::DbPool, artist_name: &str) -> LookupOutcome {
    let artist_name = artist_name.trim();
    if artist_name.is_empty() {
        return LookupOutcome::Error {
            message: "No artist name provided".to_string(),
        };
    }

    match ArtistRepo::lookup(pool, artist_name).await {
        Ok(Some(result)) => {
            tracing::info!(
                artist_name,
                matched = %result.name,
                total_tracks = result.total_tracks,
                "Artist found",
            );
            LookupOutcome::Success(result)
        }
        Ok(None) => {
            let suggestions =
                match ArtistRepo::similar_names(pool, artist_name, MAX_SUGGESTIONS).await {
                    Ok(names) => names,
                    Err(e) => {
                        tracing::warn!(artist_name, error = %e, "Suggestion query failed");
                        Vec::new()
                    }
                };
            tracing::info!(artist_name, suggestions = suggestions.len(), "No matching artist");
            LookupOutcome::no_match_suggesting(artist_name, &suggestions)
        }
        Err(e) => {
            tracing::error!(artist_name, error = %e, "Artist lookup failed");
            LookupOutcome::internal_error()
        }
    }
}

/// Run a `get.artist` event end to end.
pub async fn handle(state: &WorkerState, event: &QueueEvent) {
    let data: GetArtistData = match event.parse_data() {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed get.artist payload");
            return;
        }
    };

    let outcome = run_lookup(&state.pool, &data.artist_name).await;
    let callback = ArtistCallback::from_outcome(data.artist_name.as_str(), &outcome);
    let url = data
        .callback_url
        .as_deref()
        .unwrap_or(&*state.default_callback_url);

    match state.delivery.deliver(url, &callback).await {
        Ok(()) => tracing::info!(
            artist_name = %data.artist_name,
            status = ?outcome.status(),
            "Lookup result delivered",
        ),
        Err(e) => tracing::error!(
            artist_name = %data.artist_name,
            url,
            error = %e,
            "Lookup result could not be delivered",
        ),
    }
}
