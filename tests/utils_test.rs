use chrono::{DateTime, TimeZone, Utc};
use spotdash::{
    config::{CALLBACK_PATH, resolve_base_url},
    spotify::playlist::generated_description,
    types::{
        Artist, PlayHistory, PlaylistOverview, PlaylistSortKey, PlaylistSource, SimplifiedArtist,
        SimplifiedPlaylist, SortOrder, TimeOfDay, TimeRange, Track,
    },
    utils::*,
};

fn track(id: &str, artist_id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {}", id),
        uri: format!("spotify:track:{}", id),
        artists: vec![SimplifiedArtist {
            id: artist_id.to_string(),
            name: format!("Artist {}", artist_id),
        }],
        ..Default::default()
    }
}

fn played(track_id: &str, artist_id: &str, hour: u32) -> PlayHistory {
    PlayHistory {
        track: track(track_id, artist_id),
        played_at: Utc.with_ymd_and_hms(2024, 3, 14, hour, 30, 0).unwrap(),
    }
}

fn overview(name: &str, tracks: u64, updated: Option<DateTime<Utc>>) -> PlaylistOverview {
    PlaylistOverview {
        playlist: SimplifiedPlaylist {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: None,
            public: Some(false),
            collaborative: false,
            snapshot_id: String::new(),
            owner: Default::default(),
            tracks: Default::default(),
        },
        track_count: tracks,
        last_updated: updated,
    }
}

fn names(rows: &[PlaylistOverview]) -> Vec<&str> {
    rows.iter().map(|o| o.playlist.name.as_str()).collect()
}

#[test]
fn test_generate_state() {
    let a = generate_state();
    let b = generate_state();

    // 32 bytes, base64 without padding
    assert_eq!(a.len(), 43);
    assert_ne!(a, b);
    assert!(
        a.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
}

#[test]
fn test_time_of_day_buckets() {
    assert_eq!(time_of_day(4), TimeOfDay::Night);
    assert_eq!(time_of_day(5), TimeOfDay::Morning);
    assert_eq!(time_of_day(11), TimeOfDay::Morning);
    assert_eq!(time_of_day(12), TimeOfDay::Afternoon);
    assert_eq!(time_of_day(16), TimeOfDay::Afternoon);
    assert_eq!(time_of_day(17), TimeOfDay::Evening);
    assert_eq!(time_of_day(21), TimeOfDay::Evening);
    assert_eq!(time_of_day(22), TimeOfDay::Night);
    assert_eq!(time_of_day(0), TimeOfDay::Night);
}

#[test]
fn test_analyze_listening_history() {
    let items = vec![
        played("t1", "a1", 8),
        played("t1", "a1", 9),
        played("t2", "a1", 13),
        played("t3", "a2", 23),
        played("t4", "a3", 2),
    ];

    let analysis = analyze_listening_history(&items, &Utc);

    assert_eq!(analysis.unique_tracks_count, 4);
    assert_eq!(analysis.unique_artists_count, 3);
    assert_eq!(analysis.time_of_day_distribution[&TimeOfDay::Morning], 2);
    assert_eq!(analysis.time_of_day_distribution[&TimeOfDay::Afternoon], 1);
    assert_eq!(analysis.time_of_day_distribution[&TimeOfDay::Night], 2);
    assert!(!analysis.time_of_day_distribution.contains_key(&TimeOfDay::Evening));
}

#[test]
fn test_analyze_empty_history() {
    let analysis = analyze_listening_history(&[], &Utc);

    assert_eq!(analysis.unique_tracks_count, 0);
    assert!(analysis.time_of_day_distribution.is_empty());
}

#[test]
fn test_filter_playlists_case_insensitive() {
    let rows = vec![
        overview("Road Trip", 10, None),
        overview("Chill", 5, None),
        overview("roadhouse blues", 3, None),
    ];

    let filtered = filter_and_sort_playlists(&rows, Some("ROAD"), PlaylistSortKey::Name, SortOrder::Ascending);

    assert_eq!(names(&filtered), vec!["Road Trip", "roadhouse blues"]);
}

#[test]
fn test_sort_playlists_by_tracks_descending() {
    let rows = vec![
        overview("A", 10, None),
        overview("B", 50, None),
        overview("C", 1, None),
    ];

    let sorted = filter_and_sort_playlists(&rows, None, PlaylistSortKey::Tracks, SortOrder::Descending);

    assert_eq!(names(&sorted), vec!["B", "A", "C"]);
}

#[test]
fn test_sort_playlists_by_date_puts_undated_first() {
    let early = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let rows = vec![
        overview("Late", 1, Some(late)),
        overview("Never", 1, None),
        overview("Early", 1, Some(early)),
    ];

    let sorted = filter_and_sort_playlists(&rows, None, PlaylistSortKey::Date, SortOrder::Ascending);

    assert_eq!(names(&sorted), vec!["Never", "Early", "Late"]);
}

#[test]
fn test_select_genres_dedupes_and_caps() {
    let requested: Vec<String> = ["Rock", " jazz ", "rock", "", "pop", "soul", "funk", "metal"]
        .iter()
        .map(|g| g.to_string())
        .collect();

    let selected = select_genres(&requested);

    assert_eq!(selected, vec!["rock", "jazz", "pop", "soul", "funk"]);
    assert_eq!(selected.len(), MAX_SELECTED_GENRES);
}

#[test]
fn test_recommendation_seeds_take_leading_items() {
    let tracks = vec![track("t1", "a"), track("t2", "a"), track("t3", "a")];
    let artists: Vec<Artist> = ["x1", "x2", "x3"]
        .iter()
        .map(|id| Artist {
            id: id.to_string(),
            ..Default::default()
        })
        .collect();
    let genres = vec!["jazz".to_string(), "rock".to_string()];

    let seeds = recommendation_seeds(&tracks, &artists, &genres);

    assert_eq!(seeds.seed_tracks, vec!["t1", "t2"]);
    assert_eq!(seeds.seed_artists, vec!["x1", "x2"]);
    assert_eq!(seeds.seed_genres, vec!["jazz"]);
    assert_eq!(seeds.limit, Some(20));
    assert!(!seeds.is_empty());
}

#[test]
fn test_recommendation_seeds_without_listening_data() {
    let seeds = recommendation_seeds(&[], &[], &[]);

    assert!(seeds.is_empty());
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(185_000), "3:05");
    assert_eq!(format_duration(3_600_999), "60:00");
}

#[test]
fn test_join_artist_names() {
    let artists = vec![
        SimplifiedArtist {
            id: "1".to_string(),
            name: "Daft Punk".to_string(),
        },
        SimplifiedArtist {
            id: "2".to_string(),
            name: "Pharrell Williams".to_string(),
        },
    ];

    assert_eq!(join_artist_names(&artists), "Daft Punk, Pharrell Williams");
    assert_eq!(join_artist_names(&[]), "");
}

#[test]
fn test_base_url_lookup_order() {
    let env = |pairs: &'static [(&'static str, &'static str)]| {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    };

    assert_eq!(
        resolve_base_url(env(&[
            ("VERCEL_URL", "dash.vercel.app"),
            ("HEROKU_APP_NAME", "dash"),
            ("SPOTDASH_URL", "https://example.com"),
        ])),
        "https://dash.vercel.app"
    );
    assert_eq!(
        resolve_base_url(env(&[
            ("HEROKU_APP_NAME", "dash"),
            ("SPOTDASH_URL", "https://example.com"),
        ])),
        "https://dash.herokuapp.com"
    );
    assert_eq!(
        resolve_base_url(env(&[("SPOTDASH_URL", "https://example.com/")])),
        "https://example.com"
    );
    assert_eq!(resolve_base_url(env(&[("VERCEL_URL", "")])), "http://localhost:3000");
    assert_eq!(resolve_base_url(env(&[])), "http://localhost:3000");
}

#[test]
fn test_callback_path() {
    assert_eq!(CALLBACK_PATH, "/api/auth/callback/spotify");
}

#[test]
fn test_time_range_labels() {
    assert_eq!(TimeRange::ShortTerm.to_string(), "short_term");
    assert_eq!(TimeRange::default(), TimeRange::MediumTerm);
    assert_eq!(TimeRange::LongTerm.describe(), "all time");
}

#[test]
fn test_generated_description() {
    assert_eq!(
        generated_description(PlaylistSource::Artists, TimeRange::ShortTerm),
        "Generated from your top artists (last 4 weeks)"
    );
}
