//! Job handlers keyed by queue event name.

pub mod get_artist;

use musebot_events::{QueueEvent, GET_ARTIST_EVENT};

use crate::state::WorkerState;

/// Event names this worker handles.
pub const HANDLED_EVENTS: &[&str] = &[GET_ARTIST_EVENT];

/// Start the job for `event` on the worker's task tracker.
///
/// Returns `false` for event names the worker does not handle.
pub fn spawn(state: &WorkerState, event: QueueEvent) -> bool {
    match event.name.as_str() {
        GET_ARTIST_EVENT => {
            let job_state = state.clone();
            state.tasks.spawn(async move {
                get_artist::handle(&job_state, &event).await;
            });
            true
        }
        other => {
            tracing::debug!(event = other, "Ignoring unhandled event");
            false
        }
    }
}
