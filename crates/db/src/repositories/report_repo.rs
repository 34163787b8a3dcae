//! Catalogue-wide rankings used by chat reports.

use sqlx::SqlitePool;

use crate::models::catalogue::{ArtistListing, RankedAlbum, RankedName};

pub struct ReportRepo;

impl ReportRepo {
    /// Artists with the most tracks.
    pub async fn top_artists_by_tracks(
        pool: &SqlitePool,
        limit: i64,
    ) -> Result<Vec<RankedName>, sqlx::Error> {
        sqlx::query_as::<_, RankedName>(
            "SELECT Artist.Name AS name, COUNT(Track.TrackId) AS total \
             FROM Track \
             JOIN Album ON Track.AlbumId = Album.AlbumId \
             JOIN Artist ON Album.ArtistId = Artist.ArtistId \
             WHERE Artist.Name IS NOT NULL \
             GROUP BY Artist.ArtistId, Artist.Name \
             ORDER BY total DESC, Artist.Name \
             LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Artists with the most albums.
    pub async fn top_artists_by_albums(
        pool: &SqlitePool,
        limit: i64,
    ) -> Result<Vec<RankedName>, sqlx::Error> {
        sqlx::query_as::<_, RankedName>(
            "SELECT Artist.Name AS name, COUNT(Album.AlbumId) AS total \
             FROM Album \
             JOIN Artist ON Album.ArtistId = Artist.ArtistId \
             WHERE Artist.Name IS NOT NULL \
             GROUP BY Artist.ArtistId, Artist.Name \
             ORDER BY total DESC, Artist.Name \
             LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Genres with the most tracks.
    pub async fn top_genres(pool: &SqlitePool, limit: i64) -> Result<Vec<RankedName>, sqlx::Error> {
        sqlx::query_as::<_, RankedName>(
            "SELECT Genre.Name AS name, COUNT(Track.TrackId) AS total \
             FROM Track \
             JOIN Genre ON Track.GenreId = Genre.GenreId \
             WHERE Genre.Name IS NOT NULL \
             GROUP BY Genre.GenreId, Genre.Name \
             ORDER BY total DESC, Genre.Name \
             LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Albums with the most tracks.
    pub async fn top_albums(pool: &SqlitePool, limit: i64) -> Result<Vec<RankedAlbum>, sqlx::Error> {
        sqlx::query_as::<_, RankedAlbum>(
            "SELECT Album.Title AS title, Artist.Name AS artist_name, \
                    COUNT(Track.TrackId) AS track_count \
             FROM Track \
             JOIN Album ON Track.AlbumId = Album.AlbumId \
             JOIN Artist ON Album.ArtistId = Artist.ArtistId \
             WHERE Artist.Name IS NOT NULL \
             GROUP BY Album.AlbumId, Album.Title, Artist.Name \
             ORDER BY track_count DESC, Album.Title \
             LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Artist names in alphabetical order plus the total artist count.
    pub async fn list_artists(pool: &SqlitePool, limit: i64) -> Result<ArtistListing, sqlx::Error> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT Name FROM Artist WHERE Name IS NOT NULL ORDER BY Name LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Artist")
            .fetch_one(pool)
            .await?;

        Ok(ArtistListing { names, total_count })
    }
}
