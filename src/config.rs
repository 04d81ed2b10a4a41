//! Configuration management for spotdash.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, endpoint URLs, the callback
//! server address and the externally reachable base URL of the application.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use thiserror::Error;

/// Path the OAuth provider redirects to after the user granted access.
pub const CALLBACK_PATH: &str = "/api/auth/callback/spotify";

/// Permissions requested during sign-in.
pub const SCOPES: [&str; 10] = [
    "user-read-email",
    "user-read-private",
    "user-top-read",
    "user-read-recently-played",
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "playlist-read-private",
    "playlist-modify-public",
    "playlist-modify-private",
];

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Cannot prepare configuration directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `spotdash/.env` inside the platform-specific
/// local data directory. A missing `.env` file is not an error: every value
/// can be provided through the process environment as well.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotdash/.env`
/// - macOS: `~/Library/Application Support/spotdash/.env`
/// - Windows: `%LOCALAPPDATA%/spotdash/.env`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    // values already present in the environment win over the file
    let _ = dotenv::from_path(path);
    Ok(())
}

/// Returns the application directory inside the local data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotdash");
    path
}

/// Returns the address the local OAuth callback server binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:3000` which matches the
/// default base URL.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3000".to_string())
}

/// Returns the Spotify API client ID.
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] if `SPOTIFY_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    env::var("SPOTIFY_CLIENT_ID").map_err(|_| ConfigError::Missing("SPOTIFY_CLIENT_ID"))
}

/// Returns the Spotify API client secret.
///
/// The secret authenticates the application against the token endpoint
/// (code exchange and refresh). It should never appear in logs.
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] if `SPOTIFY_CLIENT_SECRET` is not set.
pub fn spotify_client_secret() -> Result<String, ConfigError> {
    env::var("SPOTIFY_CLIENT_SECRET").map_err(|_| ConfigError::Missing("SPOTIFY_CLIENT_SECRET"))
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token URL used for code exchange and refresh.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the market used for artist top tracks.
pub fn spotify_market() -> String {
    env::var("SPOTIFY_MARKET").unwrap_or_else(|_| "US".to_string())
}

/// Returns the space-delimited scope string requested during sign-in.
pub fn spotify_scope() -> String {
    SCOPES.join(" ")
}

/// Returns the externally reachable base URL of the application.
///
/// See [`resolve_base_url`] for the lookup order.
pub fn base_url() -> String {
    resolve_base_url(|key| env::var(key).ok())
}

/// Resolves the base URL from the given variable lookup.
///
/// # Lookup Order
///
/// 1. `VERCEL_URL` - deployment hostname, served over `https`
/// 2. `HEROKU_APP_NAME` - resolves to `https://<name>.herokuapp.com`
/// 3. `SPOTDASH_URL` - explicitly configured URL, used as is
/// 4. `http://localhost:3000`
///
/// Empty values are skipped.
///
/// # Example
///
/// ```
/// let url = resolve_base_url(|key| (key == "HEROKU_APP_NAME").then(|| "dash".to_string()));
/// assert_eq!(url, "https://dash.herokuapp.com");
/// ```
pub fn resolve_base_url<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(host) = var("VERCEL_URL") {
        return format!("https://{}", host);
    }
    if let Some(app) = var("HEROKU_APP_NAME") {
        return format!("https://{}.herokuapp.com", app);
    }
    var("SPOTDASH_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Returns the OAuth redirect URI derived from the base URL.
///
/// This must match the redirect URI registered in the Spotify application
/// settings.
pub fn spotify_redirect_uri() -> String {
    format!("{}{}", base_url(), CALLBACK_PATH)
}
