use super::*;
use crate::error::Error;
use crate::test_support::{track, track_at};

fn described(id: &str, title: &str, artist: &str, group: Option<&str>) -> Track {
    Track {
        title: title.into(),
        artist: artist.into(),
        group: group.map(str::to_string),
        ..track(id)
    }
}

#[test]
fn empty_filter_matches_everything() {
    let tracks = vec![track("a"), track("b")];
    let filter = TrackFilter::default();
    assert_eq!(filter.apply(&tracks).len(), 2);
}

#[test]
fn query_matches_title_artist_or_group_case_insensitive() {
    let tracks = vec![
        described("1", "Blackened", "Metallica", None),
        described("2", "Paranoid", "Black Sabbath", None),
        described("3", "Theme", "Orchestra", Some("Black Panther")),
        described("4", "Yellow", "Coldplay", None),
    ];
    let filter = TrackFilter {
        query: "BLACK".into(),
        ..TrackFilter::default()
    };

    let ids: Vec<String> = filter.apply(&tracks).into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn whitespace_only_query_is_ignored() {
    let tracks = vec![track("a")];
    let filter = TrackFilter {
        query: "   ".into(),
        ..TrackFilter::default()
    };
    assert_eq!(filter.apply(&tracks).len(), 1);
}

#[test]
fn category_and_language_are_exact_matches() {
    let mut bgm = track("bgm");
    bgm.category = Category::Bgm;
    let mut hindi = track("hi");
    hindi.language = "hindi".into();
    let tracks = vec![track("plain"), bgm, hindi];

    let by_category = TrackFilter {
        category: Some(Category::Bgm),
        ..TrackFilter::default()
    };
    assert_eq!(by_category.apply(&tracks)[0].id, "bgm");
    assert_eq!(by_category.apply(&tracks).len(), 1);

    let by_language = TrackFilter {
        language: Some("hindi".into()),
        ..TrackFilter::default()
    };
    assert_eq!(by_language.apply(&tracks).len(), 1);

    let partial_language = TrackFilter {
        language: Some("hin".into()),
        ..TrackFilter::default()
    };
    assert!(partial_language.apply(&tracks).is_empty());
}

#[test]
fn category_parse_accepts_common_spellings() {
    assert_eq!(Category::parse("Song"), Some(Category::Song));
    assert_eq!(Category::parse(" music "), Some(Category::Song));
    assert_eq!(Category::parse("BGM"), Some(Category::Bgm));
    assert_eq!(Category::parse("podcast"), None);
}

#[test]
fn distinct_languages_are_sorted_and_unique() {
    let mut a = track("a");
    a.language = "tamil".into();
    let mut b = track("b");
    b.language = "english".into();
    let mut c = track("c");
    c.language = "tamil".into();

    assert_eq!(distinct_languages(&[a, b, c]), vec!["english", "tamil"]);
}

#[test]
fn display_prefers_artist_dash_title() {
    let t = described("1", "Song", "  Artist  ", None);
    assert_eq!(t.display(), "Artist - Song");
    let t = described("1", "Song", "   ", None);
    assert_eq!(t.display(), "Song");
}

#[test]
fn local_catalog_lists_newest_first() {
    let catalog = LocalCatalog::from_tracks(vec![
        track_at("old", 0),
        track_at("new", 10),
        track_at("mid", 5),
    ]);
    let ids: Vec<String> = catalog.list().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[test]
fn local_catalog_delete_removes_and_reports_missing() {
    let mut catalog = LocalCatalog::from_tracks(vec![track("a"), track("b")]);
    catalog.delete("a").unwrap();
    assert_eq!(catalog.len(), 1);
    let ids: Vec<String> = catalog.list().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["b"]);

    assert!(matches!(catalog.delete("a"), Err(Error::NotFound(_))));
}

#[test]
fn track_round_trips_through_json() {
    let t = described("x", "T", "A", Some("G"));
    let json = serde_json::to_string(&t).unwrap();
    assert!(json.contains("\"category\":\"song\""));
    let back: Track = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}
