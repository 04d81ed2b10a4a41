use serde::{Deserialize, Serialize};

/// Marker stored on a credential whose refresh failed. Once set, the
/// credential can only be replaced by signing in again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialError {
    RefreshAccessTokenError,
}

/// Tokens handed out by the provider after a successful authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry in seconds since the epoch, as issued by the provider.
    pub expires_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry in milliseconds since the epoch.
    pub expires_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CredentialError>,
}

impl Credential {
    pub fn from_account(account: Account) -> Self {
        Self {
            access_token: account.access_token,
            refresh_token: account.refresh_token,
            expires_at: account.expires_at.unwrap_or(0) * 1000,
            error: None,
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }

    pub fn is_usable(&self, now_ms: i64) -> bool {
        self.error.is_none() && !self.is_expired(now_ms)
    }
}
