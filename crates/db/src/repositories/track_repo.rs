//! Track and album-listing queries.

use sqlx::SqlitePool;

use crate::models::catalogue::{AlbumRow, AlbumTrack, TrackDetail, TrackMatches};
use crate::repositories::artist_repo::escape_like;

/// Column list for [`TrackDetail`].
const TRACK_DETAIL_COLUMNS: &str = "Track.TrackId AS id, Track.Name AS name, \
     Artist.Name AS artist_name, Album.AlbumId AS album_id, Album.Title AS album_title, \
     Genre.Name AS genre, Track.Composer AS composer, Track.Milliseconds AS milliseconds, \
     CAST(Track.UnitPrice AS REAL) AS unit_price";

/// Joins shared by every [`TrackDetail`] query.
const TRACK_DETAIL_JOINS: &str = "FROM Track \
     JOIN Album ON Track.AlbumId = Album.AlbumId \
     JOIN Artist ON Album.ArtistId = Artist.ArtistId \
     LEFT JOIN Genre ON Track.GenreId = Genre.GenreId";

/// Read-only track queries.
pub struct TrackRepo;

impl TrackRepo {
    /// Tracks whose title contains `title`, case-insensitively.
    ///
    /// An exact title match sorts first, then the rest by name. At most
    /// `limit` tracks are returned; `total_count` counts all matches.
    pub async fn search_by_title(
        pool: &SqlitePool,
        title: &str,
        limit: i64,
    ) -> Result<TrackMatches, sqlx::Error> {
        let title = title.trim().to_lowercase();
        let pattern = contains_pattern(&title);

        let tracks = sqlx::query_as::<_, TrackDetail>(&format!(
            "SELECT {TRACK_DETAIL_COLUMNS} {TRACK_DETAIL_JOINS} \
             WHERE LOWER(Track.Name) LIKE ?1 ESCAPE '\\' AND Artist.Name IS NOT NULL \
             ORDER BY LOWER(Track.Name) = ?2 DESC, Track.Name, Track.TrackId \
             LIMIT ?3"
        ))
        .bind(&pattern)
        .bind(&title)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM Track \
             JOIN Album ON Track.AlbumId = Album.AlbumId \
             JOIN Artist ON Album.ArtistId = Artist.ArtistId \
             WHERE LOWER(Track.Name) LIKE ?1 ESCAPE '\\' AND Artist.Name IS NOT NULL",
        )
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        Ok(TrackMatches {
            tracks,
            total_count,
        })
    }

    /// First track whose title contains `title` by an artist whose name
    /// contains `artist`. Exact title matches win.
    pub async fn find_by_artist(
        pool: &SqlitePool,
        title: &str,
        artist: &str,
    ) -> Result<Option<TrackDetail>, sqlx::Error> {
        let title = title.trim().to_lowercase();
        let artist = artist.trim().to_lowercase();

        sqlx::query_as::<_, TrackDetail>(&format!(
            "SELECT {TRACK_DETAIL_COLUMNS} {TRACK_DETAIL_JOINS} \
             WHERE LOWER(Track.Name) LIKE ?1 ESCAPE '\\' \
               AND LOWER(Artist.Name) LIKE ?2 ESCAPE '\\' \
             ORDER BY LOWER(Track.Name) = ?3 DESC, Track.Name, Track.TrackId \
             LIMIT 1"
        ))
        .bind(contains_pattern(&title))
        .bind(contains_pattern(&artist))
        .bind(&title)
        .fetch_optional(pool)
        .await
    }

    /// 1-based position of a track within its album, in catalogue order.
    pub async fn position_on_album(
        pool: &SqlitePool,
        album_id: i64,
        track_id: i64,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM Track WHERE AlbumId = ?1 AND TrackId <= ?2",
        )
        .bind(album_id)
        .bind(track_id)
        .fetch_one(pool)
        .await
    }

    /// First album whose title contains `title`. Exact title matches win.
    pub async fn find_album(pool: &SqlitePool, title: &str) -> Result<Option<AlbumRow>, sqlx::Error> {
        let title = title.trim().to_lowercase();

        sqlx::query_as::<_, AlbumRow>(
            "SELECT Album.AlbumId AS id, Album.Title AS title, Artist.Name AS artist_name \
             FROM Album \
             JOIN Artist ON Album.ArtistId = Artist.ArtistId \
             WHERE LOWER(Album.Title) LIKE ?1 ESCAPE '\\' AND Artist.Name IS NOT NULL \
             ORDER BY LOWER(Album.Title) = ?2 DESC, Album.Title, Album.AlbumId \
             LIMIT 1",
        )
        .bind(contains_pattern(&title))
        .bind(&title)
        .fetch_optional(pool)
        .await
    }

    /// Track listing of an album in catalogue order.
    pub async fn album_tracks(pool: &SqlitePool, album_id: i64) -> Result<Vec<AlbumTrack>, sqlx::Error> {
        sqlx::query_as::<_, AlbumTrack>(
            "SELECT Name AS name, Milliseconds AS milliseconds \
             FROM Track \
             WHERE AlbumId = ?1 \
             ORDER BY TrackId",
        )
        .bind(album_id)
        .fetch_all(pool)
        .await
    }
}

fn contains_pattern(lowercased: &str) -> String {
    format!("%{}%", escape_like(lowercased))
}
