use std::sync::Arc;

use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};

use crate::{config, session::SessionManager, spotify::error::RemoteFailure};

/// Handle to the Spotify Web API on behalf of one signed-in user.
///
/// Cloning is cheap; clones share the HTTP connection pool and the
/// [`SessionManager`]. Every request asks the session for a token right
/// before it is sent, so a refresh between two calls is always picked up.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    market: String,
    session: Arc<SessionManager>,
}

impl SpotifyClient {
    pub fn new(session: Arc<SessionManager>, api_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            market: "US".to_string(),
            session,
        }
    }

    /// Builds a client against the configured API URL and market.
    pub fn from_env(session: Arc<SessionManager>) -> Self {
        Self::new(session, config::spotify_api_url()).with_market(config::spotify_market())
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub(crate) async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, RemoteFailure>
    where
        T: DeserializeOwned,
    {
        let token = self.session.get_valid_token().await?;
        let response = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        decode(response).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteFailure>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.session.get_valid_token().await?;
        let response = self
            .http
            .post(format!("{}{}", self.api_url, path))
            .json(body)
            .bearer_auth(token)
            .send()
            .await?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RemoteFailure::from_response(status.as_u16(), &body))
}
