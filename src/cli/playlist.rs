use tabled::Table;

use crate::{
    cli::Dashboard,
    info, success,
    types::{PlaylistSortKey, PlaylistSource, PlaylistTableRow, SortOrder, TimeRange},
    utils, warning,
};

pub async fn playlists(search: Option<String>, sort: PlaylistSortKey, descending: bool) {
    let dashboard = Dashboard::connect().await;
    let pb = utils::spinner("Fetching playlists...");
    let result = dashboard
        .guard(dashboard.client().get_playlist_overviews().await)
        .await;
    pb.finish_and_clear();

    let overviews = match result {
        Ok(overviews) => overviews,
        Err(e) => {
            warning!("Failed to load playlists. Please try again later. Err: {}", e);
            return;
        }
    };

    let order = if descending {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    let rows: Vec<PlaylistTableRow> =
        utils::filter_and_sort_playlists(&overviews, search.as_deref(), sort, order)
            .into_iter()
            .map(|o| PlaylistTableRow {
                name: o.playlist.name,
                tracks: o.track_count,
                updated: o
                    .last_updated
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string()),
                owner: o
                    .playlist
                    .owner
                    .display_name
                    .unwrap_or(o.playlist.owner.id),
                visibility: match o.playlist.public {
                    Some(true) => "public".to_string(),
                    Some(false) => "private".to_string(),
                    None => "-".to_string(),
                },
            })
            .collect();

    info!("{} of {} playlists", rows.len(), overviews.len());
    if !rows.is_empty() {
        println!("{}", Table::new(rows));
    }
}

pub async fn generate(name: String, source: PlaylistSource, time_range: TimeRange) {
    if name.trim().is_empty() {
        warning!("Please provide a playlist name.");
        return;
    }

    let dashboard = Dashboard::connect().await;
    let pb = utils::spinner("Generating playlist...");
    let result = dashboard
        .guard(
            dashboard
                .client()
                .generate_playlist(source, time_range, &name)
                .await,
        )
        .await;
    pb.finish_and_clear();

    match result {
        Ok((playlist, count)) => {
            success!("Playlist {} created with {} tracks.", playlist.name, count)
        }
        Err(e) => warning!("Error creating playlist. Err: {}", e),
    }
}
