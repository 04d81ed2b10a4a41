use chrono::Local;
use tabled::Table;

use crate::{
    cli::{Dashboard, track_rows},
    info,
    spotify::recommendations::DEFAULT_RECOMMENDATION_LIMIT,
    success,
    types::RecommendationSeeds,
    utils::{self, MAX_SELECTED_GENRES},
    warning,
};

/// Shows recommendations and optionally saves them as a private playlist.
///
/// Without genres the seeds come from recent listening (two top tracks, two
/// top artists, one genre). Selected genres replace those seeds; at most
/// five are used.
pub async fn discover(genres: Vec<String>, save: Option<String>) {
    let dashboard = Dashboard::connect().await;
    let client = dashboard.client();

    let pb = utils::spinner("Fetching recommendations...");
    let seeds = if genres.is_empty() {
        match dashboard.guard(client.get_discovery_seeds().await).await {
            Ok(seeds) => seeds,
            Err(e) => {
                pb.finish_and_clear();
                warning!("Failed to load recommendations. Please try again later. Err: {}", e);
                return;
            }
        }
    } else {
        let selected = utils::select_genres(&genres);
        if selected.len() < genres.len() {
            warning!(
                "Using {} of {} genres (at most {} distinct genres are allowed)",
                selected.len(),
                genres.len(),
                MAX_SELECTED_GENRES
            );
        }
        RecommendationSeeds {
            seed_genres: selected,
            limit: Some(DEFAULT_RECOMMENDATION_LIMIT),
            ..Default::default()
        }
    };

    if seeds.is_empty() {
        pb.finish_and_clear();
        info!("Not enough listening data to seed recommendations. Try --genre.");
        return;
    }

    let result = dashboard.guard(client.get_recommendations(&seeds).await).await;
    pb.finish_and_clear();

    let tracks = match result {
        Ok(tracks) => tracks,
        Err(e) => {
            warning!("Failed to load recommendations. Please try again. Err: {}", e);
            return;
        }
    };

    if tracks.is_empty() {
        info!("No recommendations found.");
        return;
    }
    println!("{}", Table::new(track_rows(&tracks)));

    let Some(name) = save else {
        return;
    };

    let user = match dashboard.guard(client.get_current_user_profile().await).await {
        Ok(user) => user,
        Err(e) => {
            warning!("Failed to create playlist. Err: {}", e);
            return;
        }
    };

    let description = format!(
        "Discovered with spotdash on {}",
        Local::now().format("%Y-%m-%d")
    );
    let uris: Vec<String> = tracks.into_iter().map(|t| t.uri).collect();
    match dashboard
        .guard(
            client
                .create_recommended_playlist(&user.id, &name, &description, &uris)
                .await,
        )
        .await
    {
        Ok(playlist) => success!("Playlist {} created with {} tracks.", playlist.name, uris.len()),
        Err(e) => warning!("Failed to create playlist. Please try again. Err: {}", e),
    }
}

pub async fn genres() {
    let dashboard = Dashboard::connect().await;
    let pb = utils::spinner("Fetching genres...");
    let result = dashboard
        .guard(dashboard.client().get_available_genres().await)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(genres) => {
            info!("{} genres available as seeds", genres.len());
            println!("{}", genres.join(", "));
        }
        Err(e) => warning!("Failed to load genres. Err: {}", e),
    }
}
