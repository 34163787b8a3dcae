use serde::Serialize;
use sqlx::FromRow;

/// A row from the `Artist` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistRow {
    pub id: i64,
    pub name: String,
}

/// An album title with the number of tracks on it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlbumTrackCount {
    pub title: String,
    pub track_count: i64,
}

/// A name ranked by some count (tracks per artist, albums per artist,
/// tracks per genre).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RankedName {
    pub name: String,
    pub total: i64,
}

/// An album ranked by track count, with its artist.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RankedAlbum {
    pub title: String,
    pub artist_name: String,
    pub track_count: i64,
}

/// A page of artist names plus the size of the whole table.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistListing {
    pub names: Vec<String>,
    pub total_count: i64,
}

/// A track joined with its album, artist and genre.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TrackDetail {
    pub id: i64,
    pub name: String,
    pub artist_name: String,
    pub album_id: i64,
    pub album_title: String,
    pub genre: Option<String>,
    pub composer: Option<String>,
    pub milliseconds: i64,
    pub unit_price: f64,
}

/// An album matched by title, with its artist.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AlbumRow {
    pub id: i64,
    pub title: String,
    pub artist_name: String,
}

/// One entry of an album's track listing.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AlbumTrack {
    pub name: String,
    pub milliseconds: i64,
}

/// Tracks whose title matched a search, capped, with the uncapped count.
#[derive(Debug, Clone, Serialize)]
pub struct TrackMatches {
    pub tracks: Vec<TrackDetail>,
    pub total_count: i64,
}
