use crate::{
    spotify::{
        SpotifyClient,
        call::{CallContext, call, fallback_genres},
        error::{ApiError, Operation},
    },
    types::{GenreSeedsResponse, RecommendationSeeds, RecommendationsResponse, TimeRange, Track},
    utils,
};

pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 20;

impl SpotifyClient {
    /// Retrieves track recommendations for the given seeds.
    ///
    /// Empty seed lists are left out of the request. The limit defaults to
    /// [`DEFAULT_RECOMMENDATION_LIMIT`].
    pub async fn get_recommendations(&self, seeds: &RecommendationSeeds) -> Result<Vec<Track>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        for (key, values) in [
            ("seed_tracks", &seeds.seed_tracks),
            ("seed_artists", &seeds.seed_artists),
            ("seed_genres", &seeds.seed_genres),
        ] {
            if !values.is_empty() {
                query.push((key, values.join(",")));
            }
        }
        query.push((
            "limit",
            seeds.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT).to_string(),
        ));

        call(Operation::Recommendations.into(), || async move {
            let response: RecommendationsResponse = self.get_json("/recommendations", &query).await?;
            Ok(response.tracks)
        })
        .await
    }

    /// Lists the genres usable as recommendation seeds.
    ///
    /// Never comes back empty: a 404 from the endpoint is answered by the
    /// call wrapper with the fallback list, and an empty answer is replaced
    /// with the same list here.
    pub async fn get_available_genres(&self) -> Result<Vec<String>, ApiError> {
        let genres = call(CallContext::available_genres(), || async move {
            let response: GenreSeedsResponse = self
                .get_json("/recommendations/available-genre-seeds", &[])
                .await?;
            Ok(response.genres)
        })
        .await?;

        if genres.is_empty() {
            return Ok(fallback_genres());
        }
        Ok(genres)
    }

    /// Derives initial recommendation seeds from recent listening.
    ///
    /// Top tracks and top artists of the last four weeks are requested
    /// together and both have to arrive before any seed is computed; if
    /// either fails, no seeds are produced.
    pub async fn get_discovery_seeds(&self) -> Result<RecommendationSeeds, ApiError> {
        let genres = self.get_available_genres().await?;

        let (top_tracks, top_artists) = tokio::join!(
            self.get_top_tracks(TimeRange::ShortTerm),
            self.get_top_artists(TimeRange::ShortTerm),
        );
        let (top_tracks, top_artists) = (top_tracks?, top_artists?);

        Ok(utils::recommendation_seeds(&top_tracks, &top_artists, &genres))
    }
}
