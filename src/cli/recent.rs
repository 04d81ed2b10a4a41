use chrono::Local;
use tabled::Table;

use crate::{
    cli::Dashboard,
    info,
    types::{PlayHistory, RecentTableRow},
    utils, warning,
};

pub async fn recent() {
    let Some(items) = load_recently_played().await else {
        return;
    };

    if items.is_empty() {
        info!("Nothing played recently.");
        return;
    }

    let rows: Vec<RecentTableRow> = items
        .into_iter()
        .map(|item| RecentTableRow {
            played_at: item
                .played_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            artists: utils::join_artist_names(&item.track.artists),
            name: item.track.name,
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub async fn history() {
    let Some(items) = load_recently_played().await else {
        return;
    };

    let analysis = utils::analyze_listening_history(&items, &Local);
    info!("Analyzed the last {} plays", items.len());
    info!("Unique artists: {}", analysis.unique_artists_count);
    info!("Unique tracks: {}", analysis.unique_tracks_count);
    for (time_of_day, count) in &analysis.time_of_day_distribution {
        info!("{:<9} {}", time_of_day.to_string(), count);
    }
}

async fn load_recently_played() -> Option<Vec<PlayHistory>> {
    let dashboard = Dashboard::connect().await;
    let pb = utils::spinner("Fetching recently played tracks...");
    let result = dashboard
        .guard(dashboard.client().get_recently_played().await)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(items) => Some(items),
        Err(e) => {
            warning!("Failed to load recently played tracks. Err: {}", e);
            None
        }
    }
}
