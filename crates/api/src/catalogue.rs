//! Song, track and album answers rendered as chat text.

use musebot_db::models::catalogue::{AlbumRow, AlbumTrack, TrackDetail, TrackMatches};
use musebot_db::repositories::TrackRepo;
use musebot_db::DbPool;

/// Tracks listed when a song title matches more than once.
const MAX_LISTED_MATCHES: i64 = 5;

/// Who performs a song.
pub async fn song_info(pool: &DbPool, title: &str) -> Result<String, sqlx::Error> {
    let matches = TrackRepo::search_by_title(pool, title, MAX_LISTED_MATCHES).await?;
    Ok(render_song_matches(title, &matches))
}

/// A song by a named artist, with its place on the album.
pub async fn track_by_artist(
    pool: &DbPool,
    title: &str,
    artist_name: &str,
) -> Result<String, sqlx::Error> {
    let Some(track) = TrackRepo::find_by_artist(pool, title, artist_name).await? else {
        return Ok(format!(
            "I couldn't find a track called '{title}' by '{artist_name}'."
        ));
    };
    let position = TrackRepo::position_on_album(pool, track.album_id, track.id).await?;
    Ok(render_track(&track, position))
}

/// An album's track listing.
pub async fn album_tracks(pool: &DbPool, album: &str) -> Result<String, sqlx::Error> {
    let Some(row) = TrackRepo::find_album(pool, album).await? else {
        return Ok(format!(
            "I couldn't find any album matching '{album}' in our database."
        ));
    };
    let tracks = TrackRepo::album_tracks(pool, row.id).await?;
    Ok(render_album(&row, &tracks))
}

/// Milliseconds as `m:ss`.
pub fn format_duration(milliseconds: i64) -> String {
    let ms = milliseconds.max(0);
    format!("{}:{:02}", ms / 60_000, (ms % 60_000) / 1_000)
}

fn render_song_matches(title: &str, matches: &TrackMatches) -> String {
    match matches.tracks.as_slice() {
        [] => format!("I couldn't find any song matching '{title}' in our database."),
        [track] if matches.total_count == 1 => {
            let mut out = format!("**{}**\n\nArtist: {}\n", track.name, track.artist_name);
            push_details(&mut out, track);
            out
        }
        tracks => {
            let mut out = format!("I found multiple tracks matching '{title}':\n\n");
            for t in tracks {
                out.push_str(&format!(
                    "• {} by {} (Album: {})\n",
                    t.name, t.artist_name, t.album_title
                ));
            }
            let rest = matches.total_count - tracks.len() as i64;
            if rest > 0 {
                out.push_str(&format!("\nAnd {rest} more matches."));
            }
            out
        }
    }
}

fn render_track(track: &TrackDetail, position: i64) -> String {
    let mut out = format!("**{}** by {}\n\n", track.name, track.artist_name);
    push_details(&mut out, track);
    out.push_str(&format!("Price: ${:.2}\n", track.unit_price));
    if position > 0 {
        out.push_str(&format!("Track #{position} on the album\n"));
    }
    out
}

/// Album, genre, composer and duration lines.
fn push_details(out: &mut String, track: &TrackDetail) {
    out.push_str(&format!("Album: {}\n", track.album_title));
    if let Some(genre) = &track.genre {
        out.push_str(&format!("Genre: {genre}\n"));
    }
    if let Some(composer) = track.composer.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        out.push_str(&format!("Composer: {composer}\n"));
    }
    out.push_str(&format!("Duration: {}\n", format_duration(track.milliseconds)));
}

fn render_album(album: &AlbumRow, tracks: &[AlbumTrack]) -> String {
    let mut out = format!("**{}** by {}\n\n", album.title, album.artist_name);
    if tracks.is_empty() {
        out.push_str("No tracks found for this album.");
    }
    for track in tracks {
        out.push_str(&format!(
            "• {} ({})\n",
            track.name,
            format_duration(track.milliseconds)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str, artist: &str) -> TrackDetail {
        TrackDetail {
            id: 1,
            name: name.into(),
            artist_name: artist.into(),
            album_id: 1,
            album_title: "Greatest Hits".into(),
            genre: Some("Rock".into()),
            composer: Some("  ".into()),
            milliseconds: 354_000,
            unit_price: 0.99,
        }
    }

    #[test]
    fn durations_are_minutes_and_padded_seconds() {
        assert_eq!(format_duration(354_000), "5:54");
        assert_eq!(format_duration(65_432), "1:05");
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(-5), "0:00");
    }

    #[test]
    fn single_song_match_skips_blank_composer() {
        let matches = TrackMatches {
            tracks: vec![track("Bohemian Rhapsody", "Queen")],
            total_count: 1,
        };

        assert_eq!(
            render_song_matches("bohemian", &matches),
            "**Bohemian Rhapsody**\n\nArtist: Queen\nAlbum: Greatest Hits\nGenre: Rock\nDuration: 5:54\n"
        );
    }

    #[test]
    fn many_song_matches_mention_the_rest() {
        let matches = TrackMatches {
            tracks: vec![track("One", "U2"), track("One More Time", "Daft Punk")],
            total_count: 7,
        };

        let text = render_song_matches("one", &matches);

        assert!(text.starts_with("I found multiple tracks matching 'one':\n\n• One by U2 (Album: Greatest Hits)\n"));
        assert!(text.ends_with("\nAnd 5 more matches."));
    }

    #[test]
    fn track_detail_includes_price_and_position() {
        let text = render_track(&track("Bohemian Rhapsody", "Queen"), 1);

        assert!(text.starts_with("**Bohemian Rhapsody** by Queen\n\n"));
        assert!(text.contains("Price: $0.99\n"));
        assert!(text.ends_with("Track #1 on the album\n"));
    }

    #[test]
    fn empty_album_says_so() {
        let album = AlbumRow {
            id: 3,
            title: "Empty Sessions".into(),
            artist_name: "Queen".into(),
        };

        assert_eq!(
            render_album(&album, &[]),
            "**Empty Sessions** by Queen\n\nNo tracks found for this album."
        );
    }
}
