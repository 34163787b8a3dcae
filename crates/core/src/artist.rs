//! Artist lookup payloads and name normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize a raw artist name into its Result Store key form.
///
/// Trims surrounding whitespace and lower-cases. Applying it twice yields the
/// same string as applying it once.
pub fn normalize_artist_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A validated, normalized artist name used to key lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArtistKey(String);

impl ArtistKey {
    /// Normalize `raw` and reject it if nothing is left.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let normalized = normalize_artist_name(raw);
        if normalized.is_empty() {
            return Err(CoreError::Validation(
                "artist_name must not be empty".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// One album row in an artist summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub title: String,
    pub track_count: u32,
}

/// The resolved artist payload: catalogue name, albums in catalogue order,
/// aggregate track count and (when known) the dominant genres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistResult {
    pub name: String,
    pub total_tracks: u32,
    pub albums: Vec<AlbumSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_genres: Option<Vec<String>>,
}

impl ArtistResult {
    /// Render the payload as the plain-text summary used in chat replies.
    pub fn to_chat_text(&self) -> String {
        let mut text = format!("**{}**\n\n", self.name);

        if self.albums.is_empty() {
            text.push_str("No albums or tracks found for this artist in our database.");
            return text;
        }

        text.push_str(&format!("Albums: {}\n", self.albums.len()));
        text.push_str(&format!("Total Tracks: {}\n\n", self.total_tracks));

        if let Some(genres) = self.main_genres.as_ref().filter(|g| !g.is_empty()) {
            text.push_str(&format!("Main Genres: {}\n\n", genres.join(", ")));
        }

        text.push_str("Albums:\n");
        for album in &self.albums {
            text.push_str(&format!("• {} ({} tracks)\n", album.title, album.track_count));
        }
        text
    }
}
