use crate::{
    spotify::{
        SpotifyClient,
        call::call,
        error::{ApiError, Operation},
    },
    types::{Artist, CursorPaging, Paging, PlayHistory, TimeRange, Track, UserProfile},
};

/// Largest page the top items and history endpoints return.
pub const MAX_ITEMS: u32 = 50;

impl SpotifyClient {
    /// Retrieves the profile of the signed-in user (`GET /me`).
    pub async fn get_current_user_profile(&self) -> Result<UserProfile, ApiError> {
        call(Operation::CurrentUserProfile.into(), || async move {
            self.get_json("/me", &[]).await
        })
        .await
    }

    /// Retrieves the user's 50 most played tracks for the given time range.
    pub async fn get_top_tracks(&self, time_range: TimeRange) -> Result<Vec<Track>, ApiError> {
        call(Operation::TopTracks.into(), || async move {
            let page: Paging<Track> = self
                .get_json("/me/top/tracks", &top_query(time_range, MAX_ITEMS))
                .await?;
            Ok(page.items)
        })
        .await
    }

    /// Retrieves the user's 50 most played artists for the given time range.
    pub async fn get_top_artists(&self, time_range: TimeRange) -> Result<Vec<Artist>, ApiError> {
        self.get_top_artists_limited(time_range, MAX_ITEMS).await
    }

    pub async fn get_top_artists_limited(
        &self,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Vec<Artist>, ApiError> {
        call(Operation::TopArtists.into(), || async move {
            let page: Paging<Artist> = self
                .get_json("/me/top/artists", &top_query(time_range, limit))
                .await?;
            Ok(page.items)
        })
        .await
    }

    /// Retrieves the 50 most recently played tracks, newest first.
    pub async fn get_recently_played(&self) -> Result<Vec<PlayHistory>, ApiError> {
        call(Operation::RecentlyPlayed.into(), || async move {
            let page: CursorPaging<PlayHistory> = self
                .get_json(
                    "/me/player/recently-played",
                    &[("limit", MAX_ITEMS.to_string())],
                )
                .await?;
            Ok(page.items)
        })
        .await
    }
}

fn top_query(time_range: TimeRange, limit: u32) -> [(&'static str, String); 2] {
    [
        ("time_range", time_range.to_string()),
        ("limit", limit.min(MAX_ITEMS).to_string()),
    ]
}
