//! spotdash Library
//!
//! This library provides a command-line dashboard for a Spotify account. It
//! signs the user in, keeps the session's access token fresh and exposes the
//! listening data (top tracks and artists, recently played, playlists,
//! recommendations) through a typed client whose failures are normalized in
//! one place.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local sign-in callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `server` - Local HTTP server for OAuth callbacks
//! - `session` - Credential ownership, token refresh and re-authentication policy
//! - `spotify` - Spotify Web API client and call wrapper
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spotdash::{session::{SessionManager, SessionStore}, spotify::{SpotifyClient, auth::OAuthClient}};
//!
//! #[tokio::main]
//! async fn main() -> spotdash::Res<()> {
//!     spotdash::config::load_env().await?;
//!     let oauth = OAuthClient::from_env()?;
//!     let session = SessionManager::restore(oauth, SessionStore::default()).await?;
//!     let client = SpotifyClient::from_env(Arc::new(session));
//!     let tracks = client.get_top_tracks(Default::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the application boundary where errors of different modules meet.
/// Module-level operations return their own `thiserror` types, which convert
/// into this boxed error with `?`.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line prefixed with a blue `o`.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Waiting for authorization in your browser...");
/// info!("{} of {} playlists", shown, total);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a confirmation line prefixed with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist {} created with {} tracks.", name, count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a fatal error to stderr and exits with code 1.
///
/// Only the CLI boundary uses this, for conditions no command can work
/// around (missing configuration, no saved session). Library code returns
/// errors instead.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration. Err: {}", e);
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning to stderr, prefixed with a yellow `!`.
///
/// Every normalized API failure and every degraded composition is reported
/// through this macro. Going to stderr keeps tables on stdout intact.
///
/// # Example
///
/// ```
/// warning!("Spotify API error in {} (status {}): {}", operation, status, message);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
