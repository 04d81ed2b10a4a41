use chrono::Utc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use crate::{
    session::{Account, Credential, CredentialError, SessionStore, StoreError},
    spotify::auth::{OAuthClient, OAuthError},
    warning,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not signed in. Please run spotdash auth")]
    NotSignedIn,
    #[error("Failed to refresh access token. Please sign in again")]
    ReauthenticationRequired,
    #[error("Failed to refresh access token: {0}")]
    Refresh(#[from] OAuthError),
}

/// Owner of the single current [`Credential`].
///
/// Readers only ever receive clones of the access token or of the whole
/// credential. Every write replaces the credential under the write lock and
/// writes are serialized through the refresh gate, so a reader never sees a
/// new access token paired with an old expiry.
pub struct SessionManager {
    oauth: OAuthClient,
    credential: RwLock<Option<Credential>>,
    refresh_gate: Mutex<()>,
    store: Option<SessionStore>,
}

impl SessionManager {
    pub fn new(oauth: OAuthClient) -> Self {
        Self {
            oauth,
            credential: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            store: None,
        }
    }

    /// Attaches a store that receives every credential change.
    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds a manager around a credential that is already known, e.g. one
    /// read back from a [`SessionStore`].
    pub fn with_credential(self, credential: Credential) -> Self {
        Self {
            credential: RwLock::new(Some(credential)),
            ..self
        }
    }

    /// Restores the session saved by a previous sign-in.
    pub async fn restore(oauth: OAuthClient, store: SessionStore) -> Result<Self, StoreError> {
        let credential = store.load().await?;
        Ok(Self::new(oauth).with_store(store).with_credential(credential))
    }

    /// Stores the tokens issued by a completed authorization as the current
    /// credential.
    pub async fn initialize(&self, account: Account) {
        let _gate = self.refresh_gate.lock().await;
        let credential = Credential::from_account(account);
        *self.credential.write().await = Some(credential.clone());
        self.persist(&credential).await;
    }

    /// Returns an access token that has not expired, refreshing first when
    /// needed.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotSignedIn`] when no credential exists
    /// - [`SessionError::ReauthenticationRequired`] when an earlier refresh
    ///   failed; the token endpoint is not contacted again
    /// - [`SessionError::Refresh`] when the refresh attempted here fails
    pub async fn get_valid_token(&self) -> Result<String, SessionError> {
        if let Some(token) = self.usable_token().await? {
            return Ok(token);
        }

        let _gate = self.refresh_gate.lock().await;
        // another caller may have refreshed while we waited for the gate
        if let Some(token) = self.usable_token().await? {
            return Ok(token);
        }
        self.refresh_locked().await
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// On success the credential is replaced as a whole and its error flag
    /// cleared. The refresh token is kept when the provider does not rotate
    /// it. On failure the error flag is set, the access token and expiry stay
    /// untouched and the error is returned. There is no retry.
    pub async fn refresh(&self) -> Result<String, SessionError> {
        let _gate = self.refresh_gate.lock().await;
        self.refresh_locked().await
    }

    /// Returns a snapshot of the current credential.
    pub async fn current(&self) -> Option<Credential> {
        self.credential.read().await.clone()
    }

    /// Drops the credential and removes the saved session.
    pub async fn sign_out(&self) -> Result<(), StoreError> {
        let _gate = self.refresh_gate.lock().await;
        *self.credential.write().await = None;
        match &self.store {
            Some(store) => store.clear().await,
            None => Ok(()),
        }
    }

    async fn usable_token(&self) -> Result<Option<String>, SessionError> {
        let guard = self.credential.read().await;
        match guard.as_ref() {
            None => Err(SessionError::NotSignedIn),
            Some(credential) if credential.error.is_some() => {
                Err(SessionError::ReauthenticationRequired)
            }
            Some(credential) if !credential.is_expired(now_ms()) => {
                Ok(Some(credential.access_token.clone()))
            }
            Some(_) => Ok(None),
        }
    }

    // Callers must hold the refresh gate.
    async fn refresh_locked(&self) -> Result<String, SessionError> {
        let refresh_token = {
            let guard = self.credential.read().await;
            match guard.as_ref() {
                Some(credential) => credential.refresh_token.clone(),
                None => return Err(SessionError::NotSignedIn),
            }
        };

        match self.oauth.refresh(&refresh_token).await {
            Ok(response) => {
                let credential = Credential {
                    access_token: response.access_token,
                    refresh_token: response.refresh_token.unwrap_or(refresh_token),
                    expires_at: now_ms() + response.expires_in * 1000,
                    error: None,
                };
                *self.credential.write().await = Some(credential.clone());
                self.persist(&credential).await;
                Ok(credential.access_token)
            }
            Err(e) => {
                warning!("Error refreshing access token: {}", e);
                let flagged = {
                    let mut guard = self.credential.write().await;
                    if let Some(credential) = guard.as_mut() {
                        credential.error = Some(CredentialError::RefreshAccessTokenError);
                    }
                    guard.clone()
                };
                if let Some(credential) = flagged {
                    self.persist(&credential).await;
                }
                Err(SessionError::Refresh(e))
            }
        }
    }

    async fn persist(&self, credential: &Credential) {
        if let Some(store) = &self.store {
            if let Err(e) = store.persist(credential).await {
                warning!("Failed to save session: {}", e);
            }
        }
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
