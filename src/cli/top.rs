use tabled::Table;

use crate::{
    cli::{Dashboard, artist_rows, track_rows},
    info,
    types::TimeRange,
    utils, warning,
};

pub async fn top_tracks(time_range: TimeRange) {
    let dashboard = Dashboard::connect().await;
    let pb = utils::spinner("Fetching top tracks...");
    let result = dashboard
        .guard(dashboard.client().get_top_tracks(time_range).await)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) if tracks.is_empty() => info!("No top tracks for the {}.", time_range.describe()),
        Ok(tracks) => {
            info!("Your top tracks ({})", time_range.describe());
            println!("{}", Table::new(track_rows(&tracks)));
        }
        Err(e) => warning!("Failed to load top tracks. Err: {}", e),
    }
}

pub async fn top_artists(time_range: TimeRange) {
    let dashboard = Dashboard::connect().await;
    let pb = utils::spinner("Fetching top artists...");
    let result = dashboard
        .guard(dashboard.client().get_top_artists(time_range).await)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(artists) if artists.is_empty() => {
            info!("No top artists for the {}.", time_range.describe())
        }
        Ok(artists) => {
            info!("Your top artists ({})", time_range.describe());
            println!("{}", Table::new(artist_rows(&artists)));
        }
        Err(e) => warning!("Failed to load top artists. Err: {}", e),
    }
}
