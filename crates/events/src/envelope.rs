//! Queue event envelope.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Event name for an artist lookup job.
pub const GET_ARTIST_EVENT: &str = "get.artist";

// ---------------------------------------------------------------------------
// QueueEvent
// ---------------------------------------------------------------------------

/// An event as the queue's HTTP event API accepts and forwards it.
///
/// Unknown fields the queue adds on delivery (`id`, `user`, `v`) are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEvent {
    /// Dot-separated event name, e.g. `"get.artist"`.
    pub name: String,

    /// Event-specific payload.
    #[serde(default)]
    pub data: serde_json::Value,

    /// Creation time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub ts: i64,
}

impl QueueEvent {
    /// Create an event with an empty data object, stamped now.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: serde_json::Value::Object(Default::default()),
            ts: Utc::now().timestamp_millis(),
        }
    }

    /// Set the data payload.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Build a `get.artist` event.
    pub fn get_artist(artist_name: impl Into<String>, callback_url: impl Into<String>) -> Self {
        let data = GetArtistData {
            artist_name: artist_name.into(),
            callback_url: Some(callback_url.into()),
        };
        Self::new(GET_ARTIST_EVENT).with_data(serde_json::json!(data))
    }

    /// Decode the data payload into a typed struct.
    pub fn parse_data<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Data carried by a `get.artist` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetArtistData {
    #[serde(default)]
    pub artist_name: String,
    /// Where the worker should post the result. Falls back to the worker's
    /// configured callback URL when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}
