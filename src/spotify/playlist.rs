use crate::{
    spotify::{
        SpotifyClient,
        call::call,
        error::{ApiError, ApiErrorKind, Operation},
    },
    types::{
        AddTracksToPlaylistRequest, AddTracksToPlaylistResponse, CreatePlaylistRequest, Paging,
        Playlist, PlaylistOverview, PlaylistSource, PlaylistTracksPage, SimplifiedPlaylist,
        TimeRange,
    },
    warning,
};

/// Page size used when walking the user's playlists.
pub const PLAYLIST_PAGE_SIZE: u64 = 50;
/// Most URIs the add-tracks endpoint accepts per request.
pub const ADD_TRACKS_BATCH: usize = 100;

const OVERVIEW_FIELDS: &str = "total,items.added_at";

impl SpotifyClient {
    /// Retrieves one page of the user's playlists.
    pub async fn get_user_playlists(&self, limit: u64, offset: u64) -> Result<Paging<SimplifiedPlaylist>, ApiError> {
        call(Operation::UserPlaylists.into(), || async move {
            self.get_json(
                "/me/playlists",
                &[
                    ("limit", limit.min(PLAYLIST_PAGE_SIZE).to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await
        })
        .await
    }

    /// Retrieves every playlist of the user.
    ///
    /// A first request with `limit=1` reveals the total; the pages of
    /// [`PLAYLIST_PAGE_SIZE`] are then requested concurrently and joined in
    /// offset order. Any failing page fails the whole listing.
    pub async fn get_all_user_playlists(&self) -> Result<Vec<SimplifiedPlaylist>, ApiError> {
        let total = self.get_user_playlists(1, 0).await?.total;

        let mut handles = Vec::new();
        for offset in (0..total).step_by(PLAYLIST_PAGE_SIZE as usize) {
            let client = self.clone();
            handles.push(tokio::spawn(async move {
                client.get_user_playlists(PLAYLIST_PAGE_SIZE, offset).await
            }));
        }

        let mut playlists = Vec::with_capacity(total as usize);
        for handle in handles {
            match handle.await {
                Ok(Ok(page)) => playlists.extend(page.items),
                Ok(Err(e)) => return Err(e),
                Err(e) => return Err(join_error(Operation::UserPlaylists, e)),
            }
        }

        Ok(playlists)
    }

    /// Retrieves one page of a playlist's items, optionally restricted to
    /// the given `fields` projection.
    pub async fn get_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u64,
        offset: u64,
        fields: Option<&str>,
    ) -> Result<PlaylistTracksPage, ApiError> {
        let path = format!("/playlists/{}/tracks", playlist_id);
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(fields) = fields {
            query.push(("fields", fields.to_string()));
        }

        call(Operation::PlaylistTracks.into(), || async move {
            self.get_json(&path, &query).await
        })
        .await
    }

    /// Lists every playlist with its track count and the date its first
    /// item was added.
    ///
    /// The detail request per playlist is best-effort: when it fails the
    /// playlist is still listed, with zero tracks and no date.
    pub async fn get_playlist_overviews(&self) -> Result<Vec<PlaylistOverview>, ApiError> {
        let playlists = self.get_all_user_playlists().await?;

        let handles: Vec<_> = playlists
            .into_iter()
            .map(|playlist| {
                let client = self.clone();
                tokio::spawn(async move { client.playlist_overview(playlist).await })
            })
            .collect();

        let mut overviews = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(overview) => overviews.push(overview),
                Err(e) => warning!("Task join error: {}", e),
            }
        }

        Ok(overviews)
    }

    async fn playlist_overview(&self, playlist: SimplifiedPlaylist) -> PlaylistOverview {
        match self
            .get_playlist_tracks(&playlist.id, 1, 0, Some(OVERVIEW_FIELDS))
            .await
        {
            Ok(page) => PlaylistOverview {
                track_count: page.total,
                last_updated: page.items.first().and_then(|item| item.added_at),
                playlist,
            },
            Err(e) => {
                warning!("Error fetching tracks for playlist {}: {}", playlist.name, e);
                PlaylistOverview {
                    playlist,
                    track_count: 0,
                    last_updated: None,
                }
            }
        }
    }

    /// Creates a playlist owned by `user_id`.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist, ApiError> {
        let path = format!("/users/{}/playlists", user_id);
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
        };

        call(Operation::CreatePlaylist.into(), || async move {
            self.post_json(&path, &body).await
        })
        .await
    }

    /// Appends tracks to a playlist in batches of [`ADD_TRACKS_BATCH`].
    ///
    /// Returns the snapshot id after the last batch, or `None` when there was
    /// nothing to add.
    pub async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<String>, ApiError> {
        let path = format!("/playlists/{}/tracks", playlist_id);
        let mut snapshot_id = None;

        for chunk in uris.chunks(ADD_TRACKS_BATCH) {
            let body = AddTracksToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            let path = path.as_str();
            let response: AddTracksToPlaylistResponse =
                call(Operation::AddTracksToPlaylist.into(), || async move {
                    self.post_json(path, &body).await
                })
                .await?;
            snapshot_id = Some(response.snapshot_id);
        }

        Ok(snapshot_id)
    }

    /// Creates a private playlist and fills it with the given tracks.
    pub async fn create_recommended_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        track_uris: &[String],
    ) -> Result<Playlist, ApiError> {
        let playlist = self.create_playlist(user_id, name, description, false).await?;

        if !track_uris.is_empty() {
            self.add_tracks_to_playlist(&playlist.id, track_uris).await?;
        }

        Ok(playlist)
    }

    /// Creates a private playlist from the user's listening.
    ///
    /// - [`PlaylistSource::Tracks`]: the 50 top tracks of the time range
    /// - [`PlaylistSource::Artists`]: the first 10 top tracks of each of the
    ///   5 top artists of the time range
    ///
    /// Returns the playlist and the number of tracks added.
    pub async fn generate_playlist(
        &self,
        source: PlaylistSource,
        time_range: TimeRange,
        name: &str,
    ) -> Result<(Playlist, usize), ApiError> {
        let user = self.get_current_user_profile().await?;
        let description = generated_description(source, time_range);
        let playlist = self.create_playlist(&user.id, name, &description, false).await?;

        let uris: Vec<String> = match source {
            PlaylistSource::Tracks => self
                .get_top_tracks(time_range)
                .await?
                .into_iter()
                .map(|track| track.uri)
                .collect(),
            PlaylistSource::Artists => {
                let mut uris = Vec::new();
                for artist in self.get_top_artists_limited(time_range, 5).await? {
                    let tracks = self.get_artist_top_tracks(&artist.id).await?;
                    uris.extend(tracks.into_iter().take(10).map(|track| track.uri));
                }
                uris
            }
        };

        self.add_tracks_to_playlist(&playlist.id, &uris).await?;
        Ok((playlist, uris.len()))
    }
}

pub fn generated_description(source: PlaylistSource, time_range: TimeRange) -> String {
    let source = match source {
        PlaylistSource::Tracks => "top tracks",
        PlaylistSource::Artists => "top artists",
    };
    format!("Generated from your {} ({})", source, time_range.describe())
}

fn join_error(operation: Operation, err: tokio::task::JoinError) -> ApiError {
    ApiError {
        kind: ApiErrorKind::Unknown,
        message: format!("Task join error: {}", err),
        source_status: 500,
        operation,
    }
}
