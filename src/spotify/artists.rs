use crate::{
    spotify::{
        SpotifyClient,
        call::call,
        error::{ApiError, Operation},
    },
    types::{Artist, ArtistAnalysis, ArtistTopTracksResponse, RelatedArtistsResponse, Track},
    warning,
};

impl SpotifyClient {
    /// Retrieves a single artist by id.
    pub async fn get_artist(&self, artist_id: &str) -> Result<Artist, ApiError> {
        let path = format!("/artists/{}", artist_id);
        call(Operation::Artist.into(), || async move {
            self.get_json(&path, &[]).await
        })
        .await
    }

    /// Retrieves the artist's top tracks in the configured market.
    pub async fn get_artist_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>, ApiError> {
        let path = format!("/artists/{}/top-tracks", artist_id);
        call(Operation::ArtistTopTracks.into(), || async move {
            let response: ArtistTopTracksResponse = self
                .get_json(&path, &[("market", self.market().to_string())])
                .await?;
            Ok(response.tracks)
        })
        .await
    }

    /// Retrieves artists similar to the given one.
    pub async fn get_related_artists(&self, artist_id: &str) -> Result<Vec<Artist>, ApiError> {
        let path = format!("/artists/{}/related-artists", artist_id);
        call(Operation::RelatedArtists.into(), || async move {
            let response: RelatedArtistsResponse = self.get_json(&path, &[]).await?;
            Ok(response.artists)
        })
        .await
    }

    /// Collects an artist together with its top tracks and related artists.
    ///
    /// The three requests run concurrently. Only the artist itself is
    /// required: a failure to load top tracks or related artists is logged
    /// and that section comes back empty.
    ///
    /// # Errors
    ///
    /// Returns the error of the artist lookup when it fails.
    pub async fn get_artist_analysis(&self, artist_id: &str) -> Result<ArtistAnalysis, ApiError> {
        let (artist, top_tracks, related_artists) = tokio::join!(
            self.get_artist(artist_id),
            self.get_artist_top_tracks(artist_id),
            self.get_related_artists(artist_id),
        );

        let artist = artist?;
        let top_tracks = top_tracks.unwrap_or_else(|e| {
            warning!("Could not load top tracks for {}: {}", artist.name, e);
            Vec::new()
        });
        let related_artists = related_artists.unwrap_or_else(|e| {
            warning!("Could not load related artists for {}: {}", artist.name, e);
            Vec::new()
        });

        Ok(ArtistAnalysis {
            artist,
            top_tracks,
            related_artists,
        })
    }
}
