use std::{cmp::Ordering, collections::HashSet, time::Duration};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{TimeZone, Timelike};
use indicatif::{ProgressBar, ProgressStyle};
use rand::RngCore;

use crate::{
    spotify::recommendations::DEFAULT_RECOMMENDATION_LIMIT,
    types::{
        Artist, ListeningHistoryAnalysis, PlayHistory, PlaylistOverview, PlaylistSortKey,
        RecommendationSeeds, SimplifiedArtist, SortOrder, TimeOfDay, Track,
    },
};

/// Most genres that can be picked as recommendation seeds.
pub const MAX_SELECTED_GENRES: usize = 5;

pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn time_of_day(hour: u32) -> TimeOfDay {
    match hour {
        5..=11 => TimeOfDay::Morning,
        12..=16 => TimeOfDay::Afternoon,
        17..=21 => TimeOfDay::Evening,
        _ => TimeOfDay::Night,
    }
}

/// Summarizes recent plays. Hours are taken in the given time zone.
pub fn analyze_listening_history<Tz: TimeZone>(items: &[PlayHistory], tz: &Tz) -> ListeningHistoryAnalysis {
    let mut unique_artists = HashSet::new();
    let mut unique_tracks = HashSet::new();
    let mut analysis = ListeningHistoryAnalysis::default();

    for item in items {
        if let Some(artist) = item.track.artists.first() {
            unique_artists.insert(artist.id.as_str());
        }
        unique_tracks.insert(item.track.id.as_str());

        let hour = item.played_at.with_timezone(tz).hour();
        *analysis
            .time_of_day_distribution
            .entry(time_of_day(hour))
            .or_insert(0) += 1;
    }

    analysis.unique_artists_count = unique_artists.len();
    analysis.unique_tracks_count = unique_tracks.len();
    analysis
}

pub fn filter_and_sort_playlists(
    overviews: &[PlaylistOverview],
    query: Option<&str>,
    key: PlaylistSortKey,
    order: SortOrder,
) -> Vec<PlaylistOverview> {
    let mut rows: Vec<PlaylistOverview> = match query.map(str::to_lowercase) {
        Some(query) => overviews
            .iter()
            .filter(|o| o.playlist.name.to_lowercase().contains(&query))
            .cloned()
            .collect(),
        None => overviews.to_vec(),
    };

    rows.sort_by(|a, b| {
        let ordering = match key {
            PlaylistSortKey::Name => compare_case_insensitive(&a.playlist.name, &b.playlist.name),
            PlaylistSortKey::Tracks => a.track_count.cmp(&b.track_count),
            // playlists without a date sort before dated ones
            PlaylistSortKey::Date => a.last_updated.cmp(&b.last_updated),
        };
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    rows
}

/// Keeps the first [`MAX_SELECTED_GENRES`] distinct, non-empty genres.
pub fn select_genres(requested: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    requested
        .iter()
        .map(|g| g.trim().to_lowercase())
        .filter(|g| !g.is_empty() && seen.insert(g.clone()))
        .take(MAX_SELECTED_GENRES)
        .collect()
}

/// Picks the first two tracks, the first two artists and the first genre.
pub fn recommendation_seeds(tracks: &[Track], artists: &[Artist], genres: &[String]) -> RecommendationSeeds {
    RecommendationSeeds {
        seed_tracks: tracks.iter().take(2).map(|t| t.id.clone()).collect(),
        seed_artists: artists.iter().take(2).map(|a| a.id.clone()).collect(),
        seed_genres: genres.iter().take(1).cloned().collect(),
        limit: Some(DEFAULT_RECOMMENDATION_LIMIT),
    }
}

pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn join_artist_names(artists: &[SimplifiedArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
