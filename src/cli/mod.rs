//! # CLI Module
//!
//! This module provides the command-line interface layer for spotdash. Every
//! dashboard page of the web version is a command here: it loads the saved
//! session, calls the matching accessors on [`SpotifyClient`] and prints the
//! result as a table.
//!
//! ## Command Categories
//!
//! ### Session
//!
//! - [`auth`] - signs in through the browser and saves the session
//! - [`logout`] - forgets the saved session
//!
//! ### Listening Data
//!
//! - [`profile`] - account information
//! - [`top_tracks`] / [`top_artists`] - most played items per time range
//! - [`recent`] - recently played tracks
//! - [`history`] - unique artists and tracks, plays per time of day
//! - [`artist`] - artist analysis with top tracks and related artists
//!
//! ### Discovery and Playlists
//!
//! - [`discover`] - recommendations from listening or selected genres,
//!   optionally saved as a playlist
//! - [`genres`] - genres usable as seeds
//! - [`playlists`] - playlist overview with search and sorting
//! - [`generate`] - playlist from top tracks or top artists
//!
//! ## Error Handling Philosophy
//!
//! A failing request never aborts a command with a panic. Failures are
//! printed as warnings; only missing configuration or a missing session end
//! the process. When the API reports that the session is no longer valid,
//! the re-authentication policy starts a new sign-in and the user reruns the
//! command afterwards.

mod artists;
mod auth;
mod discover;
mod playlist;
mod profile;
mod recent;
mod top;

use std::sync::Arc;

pub use artists::artist;
pub use auth::{auth, logout};
pub use discover::{discover, genres};
pub use playlist::{generate, playlists};
pub use profile::profile;
pub use recent::{history, recent};
pub use top::{top_artists, top_tracks};

use crate::{
    error, info,
    session::{SessionManager, SessionStore, policy},
    spotify::{self, SpotifyClient, auth::OAuthClient, error::ApiError},
    types::{Artist, ArtistTableRow, Track, TrackTableRow},
    utils, warning,
};

/// Everything a command needs to talk to the API on behalf of the user.
pub(crate) struct Dashboard {
    client: SpotifyClient,
    oauth: OAuthClient,
}

impl Dashboard {
    /// Loads the configuration and the saved session. Exits when either is
    /// missing.
    pub(crate) async fn connect() -> Self {
        let oauth = match OAuthClient::from_env() {
            Ok(oauth) => oauth,
            Err(e) => error!("Cannot load configuration. Err: {}", e),
        };

        let session = match SessionManager::restore(oauth.clone(), SessionStore::default()).await {
            Ok(session) => session,
            Err(e) => error!(
                "Failed to load session. Please run spotdash auth\n Error: {}",
                e
            ),
        };

        Self {
            client: SpotifyClient::from_env(Arc::new(session)),
            oauth,
        }
    }

    pub(crate) fn client(&self) -> &SpotifyClient {
        &self.client
    }

    /// Passes a result through the re-authentication policy.
    pub(crate) async fn guard<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        policy::enforce(result, || self.reauthenticate()).await
    }

    async fn reauthenticate(&self) {
        warning!("Your session expired. Signing in again...");
        match spotify::auth::sign_in(&self.oauth).await {
            Ok(account) => {
                self.client.session().initialize(account).await;
                info!("Signed in again. Please rerun the command.");
            }
            Err(e) => warning!("Sign-in failed: {}. Please run spotdash auth", e),
        }
    }
}

pub(crate) fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            rank: i + 1,
            name: t.name.clone(),
            artists: utils::join_artist_names(&t.artists),
            album: t.album.name.clone(),
            duration: utils::format_duration(t.duration_ms),
        })
        .collect()
}

pub(crate) fn artist_rows(artists: &[Artist]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            rank: i + 1,
            name: a.name.clone(),
            genres: a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(","),
            popularity: a.popularity,
            followers: a.followers.total,
        })
        .collect()
}
