use crate::{
    error,
    session::{SessionManager, SessionStore},
    spotify::{self, auth::OAuthClient},
    success, warning,
};

pub async fn auth() {
    let oauth = match OAuthClient::from_env() {
        Ok(oauth) => oauth,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };

    let account = match spotify::auth::sign_in(&oauth).await {
        Ok(account) => account,
        Err(e) => error!("{}", e),
    };

    let session = SessionManager::new(oauth).with_store(SessionStore::default());
    session.initialize(account).await;
    success!("Authentication successful!");
}

pub async fn logout() {
    let store = SessionStore::default();
    match store.clear().await {
        Ok(()) => success!("Signed out."),
        Err(e) => warning!("Failed to remove session at {}: {}", store.path().display(), e),
    }
}
