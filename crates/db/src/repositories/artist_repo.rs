//! Artist lookup against the `Artist`, `Album`, `Track` and `Genre` tables.

use musebot_core::{AlbumSummary, ArtistResult};
use sqlx::SqlitePool;

use crate::models::catalogue::{AlbumTrackCount, ArtistRow};

/// Number of genres reported per artist.
const MAIN_GENRE_LIMIT: i64 = 3;

/// Read-only artist queries.
pub struct ArtistRepo;

impl ArtistRepo {
    /// Find an artist by name and summarize their catalogue.
    ///
    /// Tries a case-insensitive exact match first, then a case-insensitive
    /// substring match (first by name). Returns `None` when neither hits.
    pub async fn lookup(pool: &SqlitePool, name: &str) -> Result<Option<ArtistResult>, sqlx::Error> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let artist = match Self::find_exact(pool, name).await? {
            Some(artist) => Some(artist),
            None => Self::find_partial(pool, name).await?,
        };
        let Some(artist) = artist else {
            tracing::debug!(name, "No artist matched");
            return Ok(None);
        };

        let albums = Self::albums_with_track_counts(pool, artist.id).await?;
        let total_tracks = Self::total_tracks(pool, artist.id).await?;
        let main_genres = Self::main_genres(pool, artist.id).await?;

        tracing::debug!(
            name,
            artist_id = artist.id,
            matched = %artist.name,
            albums = albums.len(),
            total_tracks,
            "Artist lookup complete",
        );

        Ok(Some(ArtistResult {
            name: artist.name,
            total_tracks: count_to_u32(total_tracks),
            albums: albums
                .into_iter()
                .map(|a| AlbumSummary {
                    title: a.title,
                    track_count: count_to_u32(a.track_count),
                })
                .collect(),
            main_genres: Some(main_genres),
        }))
    }

    /// Case-insensitive exact name match.
    pub async fn find_exact(pool: &SqlitePool, name: &str) -> Result<Option<ArtistRow>, sqlx::Error> {
        sqlx::query_as::<_, ArtistRow>(
            "SELECT ArtistId AS id, Name AS name FROM Artist \
             WHERE LOWER(Name) = LOWER(?1) \
             ORDER BY ArtistId \
             LIMIT 1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Case-insensitive substring match, first hit by name.
    pub async fn find_partial(pool: &SqlitePool, name: &str) -> Result<Option<ArtistRow>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
        sqlx::query_as::<_, ArtistRow>(
            "SELECT ArtistId AS id, Name AS name FROM Artist \
             WHERE LOWER(Name) LIKE ?1 ESCAPE '\\' \
             ORDER BY Name, ArtistId \
             LIMIT 1",
        )
        .bind(pattern)
        .fetch_optional(pool)
        .await
    }

    /// Albums by title, each with its track count (zero for empty albums).
    pub async fn albums_with_track_counts(
        pool: &SqlitePool,
        artist_id: i64,
    ) -> Result<Vec<AlbumTrackCount>, sqlx::Error> {
        sqlx::query_as::<_, AlbumTrackCount>(
            "SELECT Album.Title AS title, COUNT(Track.TrackId) AS track_count \
             FROM Album \
             LEFT JOIN Track ON Album.AlbumId = Track.AlbumId \
             WHERE Album.ArtistId = ?1 \
             GROUP BY Album.AlbumId, Album.Title \
             ORDER BY Album.Title, Album.AlbumId",
        )
        .bind(artist_id)
        .fetch_all(pool)
        .await
    }

    /// Tracks across all of the artist's albums.
    pub async fn total_tracks(pool: &SqlitePool, artist_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(Track.TrackId) \
             FROM Track \
             JOIN Album ON Track.AlbumId = Album.AlbumId \
             WHERE Album.ArtistId = ?1",
        )
        .bind(artist_id)
        .fetch_one(pool)
        .await
    }

    /// Artist names sharing a word of three or more letters with `term`, in
    /// name order, used for "did you mean" suggestions after a miss.
    pub async fn similar_names(
        pool: &SqlitePool,
        term: &str,
        limit: usize,
    ) -> Result<Vec<String>, sqlx::Error> {
        let term = term.to_lowercase();
        let words: Vec<&str> = term
            .split_whitespace()
            .filter(|w| w.chars().count() > 2)
            .collect();
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let names = sqlx::query_scalar::<_, String>(
            "SELECT Name FROM Artist WHERE Name IS NOT NULL ORDER BY Name",
        )
        .fetch_all(pool)
        .await?;

        Ok(names
            .into_iter()
            .filter(|name| {
                let name = name.to_lowercase();
                words.iter().any(|w| name.contains(w))
            })
            .take(limit)
            .collect())
    }

    /// Up to three genres with the most tracks by this artist.
    pub async fn main_genres(pool: &SqlitePool, artist_id: i64) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT Genre.Name \
             FROM Genre \
             JOIN Track ON Genre.GenreId = Track.GenreId \
             JOIN Album ON Track.AlbumId = Album.AlbumId \
             WHERE Album.ArtistId = ?1 AND Genre.Name IS NOT NULL \
             GROUP BY Genre.GenreId, Genre.Name \
             ORDER BY COUNT(Track.TrackId) DESC, Genre.Name \
             LIMIT ?2",
        )
        .bind(artist_id)
        .bind(MAIN_GENRE_LIMIT)
        .fetch_all(pool)
        .await
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn count_to_u32(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}
