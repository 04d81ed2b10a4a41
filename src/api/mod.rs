//! # API Module
//!
//! HTTP endpoints served by the local callback server while a sign-in is in
//! progress.
//!
//! - [`callback`] - receives the authorization code from Spotify, verifies the
//!   `state` value and exchanges the code for tokens
//! - [`health`] - reports status and version
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotdash::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/api/auth/callback/spotify", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
