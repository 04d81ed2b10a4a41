//! # Session Module
//!
//! Owns the authenticated session: the OAuth-derived [`Credential`], its
//! refresh lifecycle and its serialization between invocations.
//!
//! - [`SessionManager`] - single owner of the current credential; hands out
//!   unexpired access tokens and refreshes them on demand
//! - [`SessionStore`] - JSON file holding the credential in the local data
//!   directory
//! - [`policy`] - reacts to unauthorized API failures by starting a new
//!   sign-in
//!
//! A [`SessionManager`] is created once per invocation and shared by `Arc`
//! with every API client that needs a token. Nothing reads the credential
//! through global state.

mod credential;
mod manager;
pub mod policy;
mod store;

pub use credential::{Account, Credential, CredentialError};
pub use manager::{SessionError, SessionManager};
pub use store::{SessionStore, StoreError};
