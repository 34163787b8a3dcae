//! Lookup lifecycle types: store entries, the callback wire payload, and the
//! status report served to polling clients.

use serde::{Deserialize, Serialize};

use crate::artist::{AlbumSummary, ArtistKey, ArtistResult};
use crate::types::Timestamp;

/// Generic message stored when a lookup fails unexpectedly. Details stay in
/// the logs.
pub const GENERIC_LOOKUP_ERROR: &str = "An unexpected error occurred while looking up the artist";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Wire status of a lookup as seen by pollers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Pending,
    Success,
    NotFound,
    Error,
}

impl LookupStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, LookupStatus::Pending)
    }
}

// ---------------------------------------------------------------------------
// Outcome / entry
// ---------------------------------------------------------------------------

/// A terminal lookup result. There is deliberately no pending variant: a
/// resolution can never put an entry back into the pending state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Success(ArtistResult),
    NotFound { message: Option<String> },
    Error { message: String },
}

impl LookupOutcome {
    pub fn status(&self) -> LookupStatus {
        match self {
            LookupOutcome::Success(_) => LookupStatus::Success,
            LookupOutcome::NotFound { .. } => LookupStatus::NotFound,
            LookupOutcome::Error { .. } => LookupStatus::Error,
        }
    }

    /// The not-found outcome produced by a completed lookup.
    pub fn no_match(searched: &str) -> Self {
        LookupOutcome::NotFound {
            message: Some(format!("No artist found matching '{searched}'")),
        }
    }

    /// Like [`no_match`](Self::no_match), listing close artist names when
    /// there are any.
    pub fn no_match_suggesting(searched: &str, suggestions: &[String]) -> Self {
        if suggestions.is_empty() {
            return Self::no_match(searched);
        }
        let mut message = format!("No artist found matching '{searched}'\n\nDid you mean one of these?");
        for name in suggestions {
            message.push_str("\n• ");
            message.push_str(name);
        }
        LookupOutcome::NotFound {
            message: Some(message),
        }
    }

    /// The error outcome stored when the lookup itself blew up.
    pub fn internal_error() -> Self {
        LookupOutcome::Error {
            message: GENERIC_LOOKUP_ERROR.to_string(),
        }
    }
}

/// What the Result Store holds for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultEntry {
    Pending {
        since: Timestamp,
    },
    Resolved {
        outcome: LookupOutcome,
        resolved_at: Timestamp,
    },
}

impl ResultEntry {
    pub fn status(&self) -> LookupStatus {
        match self {
            ResultEntry::Pending { .. } => LookupStatus::Pending,
            ResultEntry::Resolved { outcome, .. } => outcome.status(),
        }
    }
}

// ---------------------------------------------------------------------------
// Callback payload (worker -> API)
// ---------------------------------------------------------------------------

/// Terminal statuses a callback may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackStatus {
    #[default]
    Success,
    NotFound,
    Error,
}

/// Body of `POST /webhook/artist-result`.
///
/// The artist fields sit flat next to `artist_name` and `status`, matching
/// what the worker sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCallback {
    pub artist_name: String,
    #[serde(default)]
    pub status: CallbackStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tracks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albums: Option<Vec<AlbumSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ArtistCallback {
    /// Build the callback body for a finished lookup of `artist_name`.
    pub fn from_outcome(artist_name: impl Into<String>, outcome: &LookupOutcome) -> Self {
        let mut callback = Self {
            artist_name: artist_name.into(),
            status: CallbackStatus::Success,
            name: None,
            total_tracks: None,
            albums: None,
            main_genres: None,
            message: None,
        };
        match outcome {
            LookupOutcome::Success(result) => {
                callback.name = Some(result.name.clone());
                callback.total_tracks = Some(result.total_tracks);
                callback.albums = Some(result.albums.clone());
                callback.main_genres = result.main_genres.clone();
            }
            LookupOutcome::NotFound { message } => {
                callback.status = CallbackStatus::NotFound;
                callback.message = message.clone();
            }
            LookupOutcome::Error { message } => {
                callback.status = CallbackStatus::Error;
                callback.message = Some(message.clone());
            }
        }
        callback
    }

    /// Convert into the outcome the store keeps.
    ///
    /// Missing success fields fall back to the searched name, zero tracks and
    /// no albums. A missing error message becomes a generic one.
    pub fn into_outcome(self) -> LookupOutcome {
        match self.status {
            CallbackStatus::Success => LookupOutcome::Success(ArtistResult {
                name: self.name.unwrap_or(self.artist_name),
                total_tracks: self.total_tracks.unwrap_or(0),
                albums: self.albums.unwrap_or_default(),
                main_genres: self.main_genres,
            }),
            CallbackStatus::NotFound => LookupOutcome::NotFound {
                message: self.message,
            },
            CallbackStatus::Error => LookupOutcome::Error {
                message: self
                    .message
                    .unwrap_or_else(|| "An unknown error occurred".to_string()),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Poll report (API -> client)
// ---------------------------------------------------------------------------

/// Body of `GET /get-artist-results`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupReport {
    pub status: LookupStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tracks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albums: Option<Vec<AlbumSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl LookupReport {
    fn bare(status: LookupStatus) -> Self {
        Self {
            status,
            name: None,
            total_tracks: None,
            albums: None,
            main_genres: None,
            message: None,
            updated_at: None,
        }
    }

    /// Report for a key that was never triggered nor resolved.
    ///
    /// Shares the `not_found` status with a genuine miss; only the message
    /// tells them apart.
    pub fn untriggered(key: &ArtistKey) -> Self {
        let mut report = Self::bare(LookupStatus::NotFound);
        report.message = Some(format!(
            "No results found for artist: '{key}'. Try triggering a search first."
        ));
        report
    }

    pub fn from_entry(entry: &ResultEntry) -> Self {
        match entry {
            ResultEntry::Pending { since } => {
                let mut report = Self::bare(LookupStatus::Pending);
                report.updated_at = Some(*since);
                report
            }
            ResultEntry::Resolved {
                outcome,
                resolved_at,
            } => {
                let mut report = Self::bare(outcome.status());
                report.updated_at = Some(*resolved_at);
                match outcome {
                    LookupOutcome::Success(result) => {
                        report.name = Some(result.name.clone());
                        report.total_tracks = Some(result.total_tracks);
                        report.albums = Some(result.albums.clone());
                        report.main_genres = result.main_genres.clone();
                    }
                    LookupOutcome::NotFound { message } => report.message = message.clone(),
                    LookupOutcome::Error { message } => report.message = Some(message.clone()),
                }
                report
            }
        }
    }

    /// The terminal outcome carried by this report, or `None` while pending.
    pub fn into_outcome(self) -> Option<LookupOutcome> {
        match self.status {
            LookupStatus::Pending => None,
            LookupStatus::Success => Some(LookupOutcome::Success(ArtistResult {
                name: self.name.unwrap_or_default(),
                total_tracks: self.total_tracks.unwrap_or(0),
                albums: self.albums.unwrap_or_default(),
                main_genres: self.main_genres,
            })),
            LookupStatus::NotFound => Some(LookupOutcome::NotFound {
                message: self.message,
            }),
            LookupStatus::Error => Some(LookupOutcome::Error {
                message: self.message.unwrap_or_default(),
            }),
        }
    }
}
