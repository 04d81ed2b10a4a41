use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};

use crate::{
    spotify::auth::{SignInState, now_secs},
    warning,
};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(sign_in): Extension<Arc<SignInState>>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        warning!("Authorization was denied: {}", reason);
        return Html("<h4>Authorization was denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut pending = sign_in.pending.lock().await;
    let Some(pending) = pending.as_mut() else {
        return Html("<h4>No sign-in in progress.</h4>");
    };

    if params.get("state") != Some(&pending.state) {
        warning!("Ignoring callback with unexpected state");
        return Html("<h4>Login failed: state mismatch.</h4>");
    }

    match sign_in.oauth.exchange_code(code).await {
        Ok(response) => {
            pending.account = Some(response.into_account(now_secs()));
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
