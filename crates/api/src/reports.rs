//! Catalogue reports rendered as chat text.

use musebot_core::intent::ReportKind;
use musebot_db::models::catalogue::{ArtistListing, RankedAlbum, RankedName};
use musebot_db::repositories::ReportRepo;
use musebot_db::DbPool;

const NO_DATA: &str = "No data found for this report.";

/// Run the report for `kind` and render it.
pub async fn render(pool: &DbPool, kind: ReportKind, limit: i64) -> Result<String, sqlx::Error> {
    let text = match kind {
        ReportKind::TopArtistsByTracks => ranked(
            "Artists with Most Tracks",
            "track",
            &ReportRepo::top_artists_by_tracks(pool, limit).await?,
        ),
        ReportKind::TopArtistsByAlbums => ranked(
            "Artists with Most Albums",
            "album",
            &ReportRepo::top_artists_by_albums(pool, limit).await?,
        ),
        ReportKind::TopGenres => ranked(
            "Genres with Most Tracks",
            "track",
            &ReportRepo::top_genres(pool, limit).await?,
        ),
        ReportKind::TopAlbums => albums(&ReportRepo::top_albums(pool, limit).await?),
        ReportKind::ArtistList => artist_list(&ReportRepo::list_artists(pool, limit).await?),
    };
    Ok(text)
}

fn ranked(title: &str, unit: &str, rows: &[RankedName]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }
    let mut out = format!("Top {} {title}:\n", rows.len());
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}: {}\n",
            i + 1,
            row.name,
            count(row.total, unit)
        ));
    }
    out
}

fn albums(rows: &[RankedAlbum]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }
    let mut out = format!("Top {} Albums with Most Tracks:\n", rows.len());
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} by {}: {}\n",
            i + 1,
            row.title,
            row.artist_name,
            count(row.track_count, "track")
        ));
    }
    out
}

fn artist_list(listing: &ArtistListing) -> String {
    if listing.names.is_empty() {
        return NO_DATA.to_string();
    }
    let mut out = format!(
        "Artists in the catalogue (showing {} of {}):\n",
        listing.names.len(),
        listing.total_count
    );
    for name in &listing.names {
        out.push_str(&format!("• {name}\n"));
    }
    out
}

fn count(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
