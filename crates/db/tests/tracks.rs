mod common;

use musebot_db::repositories::TrackRepo;

// ---------------------------------------------------------------------------
// Song search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_title_match_has_full_detail() {
    let pool = common::seeded_pool().await;

    let found = TrackRepo::search_by_title(&pool, "Bohemian", 5).await.unwrap();

    assert_eq!(found.total_count, 1);
    let track = &found.tracks[0];
    assert_eq!(track.name, "Bohemian Rhapsody");
    assert_eq!(track.artist_name, "Queen");
    assert_eq!(track.album_title, "Greatest Hits");
    assert_eq!(track.genre.as_deref(), Some("Rock"));
    assert_eq!(track.composer.as_deref(), Some("Freddie Mercury"));
    assert_eq!(track.milliseconds, 354_000);
    assert!((track.unit_price - 0.99).abs() < f64::EPSILON);
}

#[tokio::test]
async fn exact_title_sorts_first_and_total_ignores_limit() {
    let pool = common::seeded_pool().await;

    let found = TrackRepo::search_by_title(&pool, "one", 2).await.unwrap();

    let names: Vec<&str> = found.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["One", "Another One Bites the Dust"]);
    assert_eq!(found.total_count, 3);
}

#[tokio::test]
async fn unknown_title_matches_nothing() {
    let pool = common::seeded_pool().await;

    let found = TrackRepo::search_by_title(&pool, "yellow submarine", 5)
        .await
        .unwrap();

    assert!(found.tracks.is_empty());
    assert_eq!(found.total_count, 0);
}

// ---------------------------------------------------------------------------
// Track by artist
// ---------------------------------------------------------------------------

#[tokio::test]
async fn track_by_artist_narrows_on_both_names() {
    let pool = common::seeded_pool().await;

    let track = TrackRepo::find_by_artist(&pool, "one", "queen")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(track.name, "Another One Bites the Dust");
    assert_eq!(track.composer.as_deref(), Some("John Deacon"));
}

#[tokio::test]
async fn track_by_wrong_artist_is_none() {
    let pool = common::seeded_pool().await;

    assert!(TrackRepo::find_by_artist(&pool, "black dog", "u2")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn position_on_album_follows_catalogue_order() {
    let pool = common::seeded_pool().await;

    let track = TrackRepo::find_by_artist(&pool, "stairway", "zeppelin")
        .await
        .unwrap()
        .unwrap();
    let position = TrackRepo::position_on_album(&pool, track.album_id, track.id)
        .await
        .unwrap();

    assert_eq!(track.album_title, "IV");
    assert_eq!(position, 4);
}

// ---------------------------------------------------------------------------
// Album listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn album_is_found_by_partial_title() {
    let pool = common::seeded_pool().await;

    let album = TrackRepo::find_album(&pool, "opera").await.unwrap().unwrap();

    assert_eq!(album.title, "A Night at the Opera");
    assert_eq!(album.artist_name, "Queen");
}

#[tokio::test]
async fn album_tracks_keep_catalogue_order() {
    let pool = common::seeded_pool().await;

    let album = TrackRepo::find_album(&pool, "IV").await.unwrap().unwrap();
    let tracks = TrackRepo::album_tracks(&pool, album.id).await.unwrap();

    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Black Dog", "Rock and Roll", "The Battle of Evermore", "Stairway to Heaven"]
    );
    assert_eq!(tracks[0].milliseconds, 296_000);
}

#[tokio::test]
async fn empty_album_has_no_tracks() {
    let pool = common::seeded_pool().await;

    let album = TrackRepo::find_album(&pool, "empty sessions")
        .await
        .unwrap()
        .unwrap();

    assert!(TrackRepo::album_tracks(&pool, album.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_album_is_none() {
    let pool = common::seeded_pool().await;

    assert!(TrackRepo::find_album(&pool, "abbey road").await.unwrap().is_none());
}
