//! # Spotify Integration Module
//!
//! This module is the integration layer between spotdash and the Spotify Web
//! API. It covers the OAuth sign-in, every data accessor the dashboard uses
//! and the one place where remote failures are normalized.
//!
//! ## Architecture
//!
//! ```text
//! CLI commands
//!      ↓
//! SpotifyClient accessors (user, artists, recommendations, playlist)
//!      ↓
//! Call wrapper (call) ── normalize ──→ ApiError
//!      ↓                                    ↓
//! HTTP layer (reqwest) ← token ← SessionManager   session::policy (re-auth)
//!      ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication
//!
//! [`auth`] - Authorization-code flow with the application's client secret:
//! - **Authorization URL**: scopes and a random `state` value
//! - **Local Callback Server**: receives the code and exchanges it for tokens
//! - **Token Refresh**: used by the session manager when a token expired
//!
//! ### Call Wrapper
//!
//! [`call`] - Every accessor runs its request as a thunk through
//! [`call::call`]. Successful results pass unchanged; failures are logged
//! and normalized into one of four [`error::ApiErrorKind`]s. One recovery
//! is built in: the genre seed listing answers a 404 with a fixed list of
//! genres.
//!
//! ### Accessors
//!
//! - `user` - profile, top tracks, top artists, recently played
//! - `artists` - artist lookup, top tracks, related artists, artist analysis
//! - `recommendations` - recommendations, genre seeds, discovery seeds
//! - `playlist` - playlist listing and details, creation, adding tracks,
//!   playlist generation
//!
//! ## Error Handling Philosophy
//!
//! Nothing above the wrapper sees a transport error. Callers receive either
//! a value or an [`error::ApiError`] with a readable message:
//!
//! - **Unauthorized**: the session is gone; recovery is a new sign-in, which
//!   is triggered by [`crate::session::policy`], not by the wrapper
//! - **NotFound**: surfaced, except for the genre seed listing
//! - **RateLimited**: surfaced with a hint to retry later, no backoff
//! - **Unknown**: anything else, with the provider's message preserved
//!
//! Compositions degrade instead of failing where the data is optional: an
//! artist analysis without related artists still shows the artist.
//!
//! ## Concurrency
//!
//! Requests that belong together are issued concurrently (`tokio::join!` or
//! spawned tasks) and always awaited together before their results are
//! combined. In-flight requests are never cancelled.
//!
//! ## API Coverage
//!
//! - `GET /me`, `GET /me/top/{tracks,artists}`, `GET /me/player/recently-played`
//! - `GET /artists/{id}`, `GET /artists/{id}/top-tracks`, `GET /artists/{id}/related-artists`
//! - `GET /recommendations`, `GET /recommendations/available-genre-seeds`
//! - `GET /me/playlists`, `GET /playlists/{id}/tracks`
//! - `POST /users/{user_id}/playlists`, `POST /playlists/{id}/tracks`
//! - `POST /api/token` on the accounts service for code exchange and refresh

pub mod artists;
pub mod auth;
pub mod call;
mod client;
pub mod error;
pub mod playlist;
pub mod recommendations;
pub mod user;

pub use client::SpotifyClient;
