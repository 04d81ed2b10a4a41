use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::{Mutex, oneshot};

use crate::{
    config::{self, ConfigError},
    info,
    server::start_api_server,
    session::Account,
    utils, warning,
};

const SIGN_IN_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Token endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Token endpoint rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("Malformed token response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid authorization URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Error)]
pub enum SignInError {
    #[error("Cannot start callback server: {0}")]
    Server(#[from] std::io::Error),
    #[error(transparent)]
    OAuth(#[from] OAuthError),
    #[error("Authentication failed or timed out")]
    TimedOut,
}

/// Body returned by the token endpoint for both code exchange and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Absent when the provider does not rotate the refresh token.
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

impl TokenResponse {
    pub fn into_account(self, now_secs: i64) -> Account {
        Account {
            access_token: self.access_token,
            refresh_token: self.refresh_token.unwrap_or_default(),
            expires_at: Some(now_secs + self.expires_in),
        }
    }
}

/// Client for the provider's authorization and token endpoints.
///
/// Authenticates with the application's client credentials (HTTP Basic) on
/// every token request.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    authorize_url: String,
    token_url: String,
    redirect_uri: String,
    scope: String,
}

impl OAuthClient {
    pub fn new(client_id: String, client_secret: String, token_url: String) -> Self {
        Self {
            http: Client::new(),
            client_id,
            client_secret,
            authorize_url: config::spotify_auth_url(),
            token_url,
            redirect_uri: config::spotify_redirect_uri(),
            scope: config::spotify_scope(),
        }
    }

    /// Builds the client from the configured credentials and endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the client id or secret is not
    /// configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            config::spotify_client_id()?,
            config::spotify_client_secret()?,
            config::spotify_token_url(),
        ))
    }

    pub fn with_http(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_redirect_uri(mut self, redirect_uri: String) -> Self {
        self.redirect_uri = redirect_uri;
        self
    }

    /// Returns the URL the user has to visit to grant access.
    pub fn authorize_url(&self, state: &str) -> Result<String, OAuthError> {
        let url = Url::parse_with_params(
            &self.authorize_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", self.scope.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| OAuthError::InvalidUrl(e.to_string()))?;
        Ok(url.into())
    }

    /// Exchanges an authorization code received on the callback.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, OAuthError> {
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ])
        .await
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// Sends `grant_type=refresh_token&refresh_token=<token>` to the token
    /// endpoint. Any non-2xx answer is reported as [`OAuthError::Rejected`].
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, OAuthError> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, OAuthError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OAuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Sign-in attempt waiting for its callback.
#[derive(Debug, Clone)]
pub struct PendingSignIn {
    pub state: String,
    pub account: Option<Account>,
}

/// State shared between [`sign_in`] and the callback handler.
pub struct SignInState {
    pub oauth: OAuthClient,
    pub pending: Mutex<Option<PendingSignIn>>,
}

/// Runs the complete authorization-code sign-in.
///
/// 1. Generates a random `state` value that the callback has to echo
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the default browser
/// 4. Waits until the callback exchanged the code for tokens
/// 5. Shuts the callback server down again
///
/// The returned [`Account`] still has to be handed to
/// [`SessionManager::initialize`](crate::session::SessionManager::initialize).
///
/// # Errors
///
/// Fails when the callback server cannot bind, when the authorization URL
/// cannot be built, or when no callback arrived within two minutes.
pub async fn sign_in(oauth: &OAuthClient) -> Result<Account, SignInError> {
    let state = utils::generate_state();
    let shared = Arc::new(SignInState {
        oauth: oauth.clone(),
        pending: Mutex::new(Some(PendingSignIn {
            state: state.clone(),
            account: None,
        })),
    });

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let server = start_api_server(&config::server_addr(), Arc::clone(&shared), shutdown_rx).await?;

    let auth_url = oauth.authorize_url(&state)?;
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }
    info!("Waiting for authorization in your browser...");

    let account = wait_for_account(&shared).await;

    let _ = shutdown_tx.send(());
    let _ = server.await;

    account.ok_or(SignInError::TimedOut)
}

async fn wait_for_account(shared: &SignInState) -> Option<Account> {
    let start = tokio::time::Instant::now();

    while start.elapsed() < SIGN_IN_TIMEOUT {
        {
            let lock = shared.pending.lock().await;
            if let Some(account) = lock.as_ref().and_then(|p| p.account.clone()) {
                return Some(account);
            }
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}

pub(crate) fn now_secs() -> i64 {
    Utc::now().timestamp()
}
