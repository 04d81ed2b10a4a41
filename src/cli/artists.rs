use tabled::Table;

use crate::{
    cli::{Dashboard, artist_rows, track_rows},
    info,
    types::TimeRange,
    utils, warning,
};

/// Shows the analysis of one artist. Without an id, the user's favorite
/// artist of the last six months is analyzed.
pub async fn artist(artist_id: Option<String>) {
    let dashboard = Dashboard::connect().await;

    let artist_id = match artist_id {
        Some(id) => id,
        None => {
            let top = dashboard
                .guard(dashboard.client().get_top_artists(TimeRange::MediumTerm).await)
                .await;
            match top {
                Ok(artists) => match artists.into_iter().next() {
                    Some(artist) => artist.id,
                    None => {
                        info!("No top artists yet. Pass an artist with --id.");
                        return;
                    }
                },
                Err(e) => {
                    warning!("Failed to load top artists. Err: {}", e);
                    return;
                }
            }
        }
    };

    let pb = utils::spinner("Analyzing artist...");
    let result = dashboard
        .guard(dashboard.client().get_artist_analysis(&artist_id).await)
        .await;
    pb.finish_and_clear();

    let analysis = match result {
        Ok(analysis) => analysis,
        Err(e) => {
            warning!("Failed to analyze artist. Err: {}", e);
            return;
        }
    };

    let artist = &analysis.artist;
    info!("{}", artist.name);
    info!("Genres: {}", artist.genres.join(", "));
    info!("Popularity: {}/100", artist.popularity);
    info!("Followers: {}", artist.followers.total);

    info!("Top tracks");
    if analysis.top_tracks.is_empty() {
        println!("  none available");
    } else {
        println!("{}", Table::new(track_rows(&analysis.top_tracks)));
    }

    info!("Related artists");
    if analysis.related_artists.is_empty() {
        println!("  none available");
    } else {
        println!("{}", Table::new(artist_rows(&analysis.related_artists)));
    }
}
