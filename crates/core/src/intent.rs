//! Rule-based intent detection for chat messages.
//!
//! Decides whether a message is a greeting, an artist lookup that should go
//! through the dispatch flow, a song, track or album question answered
//! straight from the catalogue, a catalogue report, or free text for the LLM.

use std::sync::LazyLock;

use regex::Regex;

/// Default row count for top-N reports.
pub const DEFAULT_REPORT_LIMIT: i64 = 5;

/// Upper bound for top-N reports.
pub const MAX_REPORT_LIMIT: i64 = 100;

/// Default row count when listing artists.
pub const DEFAULT_ARTIST_LIST_LIMIT: i64 = 50;

/// Upper bound when listing artists.
pub const MAX_ARTIST_LIST_LIMIT: i64 = 500;

const GREETINGS: &[&str] = &["hi", "hello", "hey"];

/// Characters allowed inside a captured name: letters and digits in any
/// script plus the punctuation found in catalogue names.
const NAME: &str = r"([\p{L}\p{N} &'’,./-]+?)";

/// Optional trailing punctuation and end of message.
const END: &str = r"\s*[?.!]?$";

/// Leading "the song" / "the track", dropped from song titles.
const SONG_PREFIX: &str = r"(?:the\s+)?(?:(?:song|track)\s+)?";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

// --- artist lookups --------------------------------------------------------

static WHO_IS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"^who\s+is\s+{NAME}{END}")));

static ABOUT_ARTIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?:tell\s+me\s+about|info(?:rmation)?\s+(?:on|about)|look\s*up)\s+(?:the\s+)?(?:artist|band)\s+{NAME}{END}"
    ))
});

static BARE_ARTIST_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"^artist:?\s+{NAME}{END}")));

static ALBUMS_BY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"albums?\s+(?:by|from|of)\s+{NAME}{END}")));

/// "tell me about X" without saying X is an artist. Tried after reports.
static ABOUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?:tell\s+me\s+about|info(?:rmation)?\s+(?:on|about)|look\s*up)\s+{NAME}{END}"
    ))
});

// --- songs, tracks and albums ----------------------------------------------

static WHO_SANG_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^who\s+(?:sang|sings|performs|performed|recorded|wrote|made)\s+{SONG_PREFIX}{NAME}{END}"
    ))
});

static ARTIST_FOR_SONG_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^who\s+is\s+the\s+(?:artist|singer|band)\s+(?:for|of|behind)\s+{SONG_PREFIX}{NAME}{END}"
    ))
});

static TRACK_BY_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?:tell\s+me\s+(?:more\s+)?about|info(?:rmation)?\s+(?:on|about)|more\s+about)\s+{SONG_PREFIX}{NAME}\s+by\s+{NAME}{END}"
    ))
});

static SONG_BY_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^(?:the\s+)?(?:song|track)\s+{NAME}\s+by\s+{NAME}{END}"
    ))
});

static ALBUM_TRACKS_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?:tell|show|what|list|give)\s+(?:me\s+)?(?:all\s+)?(?:the\s+)?(?:songs|tracks)\s+(?:are\s+)?(?:in|on|from)\s+(?:the\s+)?(?:album\s+)?{NAME}{END}"
    ))
});

// --- reports ---------------------------------------------------------------

/// Words that make a message a ranking request rather than a question.
static RANKING_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(?:top|list|report|rank(?:ed|ing)?)\b|\bmost\s+(?:tracks|songs|albums|records)\b")
});

static LIMIT_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"top\s+(\d+)",
        r"(\d+)\s+most",
        r"(\d+)\s+top",
        r"show\s+me\s+(\d+)",
        r"limit\s+(?:to\s+)?(\d+)",
        r"^(\d+)\s+",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

/// Which catalogue report a message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    TopArtistsByTracks,
    TopArtistsByAlbums,
    TopGenres,
    TopAlbums,
    ArtistList,
}

/// What the conversational endpoint should do with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatIntent {
    Greeting,
    ArtistLookup { artist_name: String },
    /// Who performs a song.
    SongLookup { title: String },
    /// A specific song by a specific artist.
    TrackByArtist { title: String, artist_name: String },
    /// The track listing of an album.
    AlbumTracks { album: String },
    Report { kind: ReportKind, limit: i64 },
    Freeform,
}

/// Classify a chat message.
pub fn detect_intent(message: &str) -> ChatIntent {
    let text = message.trim().to_lowercase();
    let bare = text.trim_end_matches(['!', '.', '?']);

    if GREETINGS.contains(&bare) {
        return ChatIntent::Greeting;
    }

    if let Some(album) = capture(&ALBUM_TRACKS_RE, &text) {
        return ChatIntent::AlbumTracks { album };
    }

    if let Some(title) = [&*WHO_SANG_RE, &*ARTIST_FOR_SONG_RE]
        .iter()
        .find_map(|re| capture(re, &text))
    {
        return ChatIntent::SongLookup { title };
    }

    if let Some(artist_name) = capture(&ALBUMS_BY_RE, &text) {
        return ChatIntent::ArtistLookup { artist_name };
    }

    if let Some((title, artist_name)) = track_by_artist(&text) {
        return ChatIntent::TrackByArtist { title, artist_name };
    }

    if let Some(artist_name) = artist_lookup_target(&text) {
        return ChatIntent::ArtistLookup { artist_name };
    }

    if let Some(kind) = report_kind(&text) {
        let limit = match kind {
            ReportKind::ArtistList => clamp_limit(
                extract_limit(&text),
                DEFAULT_ARTIST_LIST_LIMIT,
                MAX_ARTIST_LIST_LIMIT,
            ),
            _ => clamp_limit(extract_limit(&text), DEFAULT_REPORT_LIMIT, MAX_REPORT_LIMIT),
        };
        return ChatIntent::Report { kind, limit };
    }

    match capture(&ABOUT_RE, &text) {
        Some(name) if !names_a_non_artist(&name) => ChatIntent::ArtistLookup { artist_name: name },
        _ => ChatIntent::Freeform,
    }
}

/// Pull a numeric row limit out of phrases like "top 10" or "show me 3".
pub fn extract_limit(message: &str) -> Option<i64> {
    let text = message.to_lowercase();
    LIMIT_RES
        .iter()
        .filter_map(|re| re.captures(&text))
        .find_map(|caps| caps.get(1)?.as_str().parse().ok())
}

/// Clamp a requested limit into `1..=max`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// First capture group, trimmed, if non-empty.
fn capture(re: &Regex, text: &str) -> Option<String> {
    let name = re.captures(text)?.get(1)?.as_str().trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn track_by_artist(text: &str) -> Option<(String, String)> {
    let caps = [&*TRACK_BY_RE, &*SONG_BY_RE]
        .iter()
        .find_map(|re| re.captures(text))?;
    let title = caps.get(1)?.as_str().trim();
    let artist = caps.get(2)?.as_str().trim();
    if title.is_empty() || artist.is_empty() || names_a_non_artist(title) {
        return None;
    }
    Some((title.to_string(), artist.to_string()))
}

fn artist_lookup_target(text: &str) -> Option<String> {
    let name = [&*WHO_IS_RE, &*ABOUT_ARTIST_RE, &*BARE_ARTIST_RE]
        .iter()
        .find_map(|re| capture(re, text))?;

    // "who is the best band" is a question, not a name.
    if ["the top", "the most", "the best", "the biggest", "the greatest"]
        .iter()
        .any(|p| name.starts_with(p))
    {
        return None;
    }
    Some(name)
}

/// Loose captures that point at a catalogue concept rather than a name.
fn names_a_non_artist(name: &str) -> bool {
    let first = name
        .trim_start_matches("the ")
        .split_whitespace()
        .next()
        .unwrap_or_default();
    matches!(
        first,
        "album" | "albums" | "song" | "songs" | "track" | "tracks" | "genre" | "genres" | "top"
            | "most"
    )
}

fn report_kind(text: &str) -> Option<ReportKind> {
    if ["all artists", "list artists", "all the artists"]
        .iter()
        .any(|p| text.contains(p))
    {
        return Some(ReportKind::ArtistList);
    }

    if !RANKING_RE.is_match(text) && extract_limit(text).is_none() {
        return None;
    }

    let mentions = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if mentions(&["genre", "category", "categories"]) {
        Some(ReportKind::TopGenres)
    } else if mentions(&["album", "record"]) {
        if mentions(&["artist", "band", "musician"]) {
            Some(ReportKind::TopArtistsByAlbums)
        } else {
            Some(ReportKind::TopAlbums)
        }
    } else if mentions(&["artist", "band", "musician", "track", "song"]) {
        Some(ReportKind::TopArtistsByTracks)
    } else {
        None
    }
}
