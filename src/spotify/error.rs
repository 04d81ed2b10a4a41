use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::session::SessionError;

pub const UNAUTHORIZED_MESSAGE: &str = "Session expired. Please sign in again and retry.";
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please retry later.";
pub const UNKNOWN_MESSAGE: &str = "Unknown error occurred";
pub const DEFAULT_STATUS: u16 = 500;

/// Remote operations issued through the call wrapper. The label only
/// identifies the call in diagnostics and selects recovery policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CurrentUserProfile,
    TopTracks,
    TopArtists,
    RecentlyPlayed,
    Artist,
    ArtistTopTracks,
    RelatedArtists,
    Recommendations,
    AvailableGenres,
    UserPlaylists,
    PlaylistTracks,
    CreatePlaylist,
    AddTracksToPlaylist,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CurrentUserProfile => "current_user_profile",
            Operation::TopTracks => "top_tracks",
            Operation::TopArtists => "top_artists",
            Operation::RecentlyPlayed => "recently_played",
            Operation::Artist => "artist",
            Operation::ArtistTopTracks => "artist_top_tracks",
            Operation::RelatedArtists => "related_artists",
            Operation::Recommendations => "recommendations",
            Operation::AvailableGenres => "available_genres",
            Operation::UserPlaylists => "user_playlists",
            Operation::PlaylistTracks => "playlist_tracks",
            Operation::CreatePlaylist => "create_playlist",
            Operation::AddTracksToPlaylist => "add_tracks_to_playlist",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Recoverable by signing in again, not by retrying.
    Unauthorized,
    NotFound,
    /// No backoff is applied; the caller decides when to retry.
    RateLimited,
    Unknown,
}

/// Normalized failure of a remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub source_status: u16,
    pub operation: Operation,
}

/// Error object inside a provider error body:
/// `{"error": {"status": 404, "message": "..."}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderError {
    pub status: Option<u16>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderErrorBody {
    pub error: ProviderError,
}

/// Raw failure of a remote thunk before normalization.
///
/// Depending on where the request failed, a status and message can sit in
/// several places; [`normalize`] looks them up in a fixed order.
#[derive(Debug, Default)]
pub struct RemoteFailure {
    pub status: Option<u16>,
    pub message: Option<String>,
    pub body: Option<ProviderErrorBody>,
    pub transport: Option<reqwest::Error>,
}

impl RemoteFailure {
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Failure built from a non-2xx response and its raw body. A body that is
    /// not a provider error object is ignored.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self {
            status: Some(status),
            body: serde_json::from_str(body).ok(),
            ..Default::default()
        }
    }

    /// Failure carrying only a provider error body.
    pub fn from_body(body: ProviderErrorBody) -> Self {
        Self {
            body: Some(body),
            ..Default::default()
        }
    }
}

impl From<reqwest::Error> for RemoteFailure {
    fn from(err: reqwest::Error) -> Self {
        Self {
            transport: Some(err),
            ..Default::default()
        }
    }
}

impl From<SessionError> for RemoteFailure {
    // no usable token means the remote side would answer 401 anyway
    fn from(err: SessionError) -> Self {
        Self::with_status(401).with_message(err.to_string())
    }
}

type StatusSource = fn(&RemoteFailure) -> Option<u16>;
type MessageSource = fn(&RemoteFailure) -> Option<String>;

/// Where a status code is looked up, first match wins:
///
/// 1. the direct status of the failure
/// 2. `error.status` of the provider error body
/// 3. the status attached to the transport error
///
/// [`DEFAULT_STATUS`] applies when none is present.
const STATUS_SOURCES: [StatusSource; 3] = [direct_status, body_status, transport_status];

/// Where a message is looked up, first match wins:
///
/// 1. the direct message of the failure
/// 2. `error.message` of the provider error body
/// 3. the text of the transport error
///
/// [`UNKNOWN_MESSAGE`] applies when none is present.
const MESSAGE_SOURCES: [MessageSource; 3] = [direct_message, body_message, transport_message];

fn direct_status(failure: &RemoteFailure) -> Option<u16> {
    failure.status
}

fn body_status(failure: &RemoteFailure) -> Option<u16> {
    failure.body.as_ref().and_then(|b| b.error.status)
}

fn transport_status(failure: &RemoteFailure) -> Option<u16> {
    failure
        .transport
        .as_ref()
        .and_then(|e| e.status())
        .map(|s| s.as_u16())
}

fn direct_message(failure: &RemoteFailure) -> Option<String> {
    failure.message.clone()
}

fn body_message(failure: &RemoteFailure) -> Option<String> {
    failure.body.as_ref().and_then(|b| b.error.message.clone())
}

fn transport_message(failure: &RemoteFailure) -> Option<String> {
    failure.transport.as_ref().map(|e| e.to_string())
}

pub fn extract_status(failure: &RemoteFailure) -> u16 {
    STATUS_SOURCES
        .iter()
        .find_map(|source| source(failure))
        .unwrap_or(DEFAULT_STATUS)
}

pub fn extract_message(failure: &RemoteFailure) -> String {
    MESSAGE_SOURCES
        .iter()
        .find_map(|source| source(failure))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| UNKNOWN_MESSAGE.to_string())
}

/// Converts a raw failure into an [`ApiError`].
///
/// | status | kind           | message                      |
/// |--------|----------------|------------------------------|
/// | 401    | `Unauthorized` | session expired, sign in     |
/// | 404    | `NotFound`     | resource not found           |
/// | 429    | `RateLimited`  | retry later                  |
/// | other  | `Unknown`      | extracted message            |
pub fn normalize(operation: Operation, failure: &RemoteFailure) -> ApiError {
    let status = extract_status(failure);
    let (kind, message) = match status {
        401 => (ApiErrorKind::Unauthorized, UNAUTHORIZED_MESSAGE.to_string()),
        404 => (ApiErrorKind::NotFound, NOT_FOUND_MESSAGE.to_string()),
        429 => (ApiErrorKind::RateLimited, RATE_LIMITED_MESSAGE.to_string()),
        _ => (ApiErrorKind::Unknown, extract_message(failure)),
    };

    ApiError {
        kind,
        message,
        source_status: status,
        operation,
    }
}
