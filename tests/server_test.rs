mod common;

use std::{collections::HashMap, sync::Arc};

use axum::{Form, Json, Router, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::{Value, json};
use spotdash::{
    config::CALLBACK_PATH,
    server::start_api_server,
    spotify::auth::{PendingSignIn, SignInState},
};
use tokio::sync::{Mutex, oneshot};

use common::{Hits, oauth, serve};

async fn code_exchange_server(hits: Hits) -> String {
    let handler = move |Form(form): Form<HashMap<String, String>>| {
        let hits = hits.clone();
        async move {
            hits.hit();
            if form.get("grant_type").map(String::as_str) != Some("authorization_code")
                || form.get("code").map(String::as_str) != Some("good-code")
            {
                return (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid_grant" })))
                    .into_response();
            }
            Json(json!({
                "access_token": "access",
                "refresh_token": "refresh",
                "expires_in": 3600,
                "token_type": "Bearer"
            }))
            .into_response()
        }
    };

    let base = serve(Router::new().route("/api/token", post(handler))).await;
    format!("{}/api/token", base)
}

fn free_addr() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().to_string()
}

struct Running {
    base: String,
    state: Arc<SignInState>,
    shutdown: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<()>,
}

async fn start(token_url: &str, pending: Option<PendingSignIn>) -> Running {
    let addr = free_addr();
    let state = Arc::new(SignInState {
        oauth: oauth(token_url),
        pending: Mutex::new(pending),
    });
    let (shutdown, rx) = oneshot::channel();
    let handle = start_api_server(&addr, Arc::clone(&state), rx).await.unwrap();

    Running {
        base: format!("http://{}", addr),
        state,
        shutdown,
        handle,
    }
}

fn pending(state: &str) -> Option<PendingSignIn> {
    Some(PendingSignIn {
        state: state.to_string(),
        account: None,
    })
}

async fn health(base: &str) -> Value {
    reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn callback(base: &str, query: &str) -> String {
    reqwest::get(format!("{}{}?{}", base, CALLBACK_PATH, query))
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_callback_completes_sign_in() {
    let hits = Hits::default();
    let token_url = code_exchange_server(hits.clone()).await;
    let server = start(&token_url, pending("expected-state")).await;

    assert_eq!(health(&server.base).await["sign_in"], "pending");

    let page = callback(&server.base, "code=good-code&state=expected-state").await;
    assert!(page.contains("Authentication successful"));

    let account = server
        .state
        .pending
        .lock()
        .await
        .as_ref()
        .and_then(|p| p.account.clone())
        .unwrap();
    assert_eq!(account.access_token, "access");
    assert_eq!(account.refresh_token, "refresh");
    assert!(account.expires_at.is_some());
    assert_eq!(hits.count(), 1);

    let health = health(&server.base).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["sign_in"], "complete");

    server.shutdown.send(()).unwrap();
    server.handle.await.unwrap();
}

#[tokio::test]
async fn test_callback_rejects_state_mismatch() {
    let hits = Hits::default();
    let token_url = code_exchange_server(hits.clone()).await;
    let server = start(&token_url, pending("expected-state")).await;

    let page = callback(&server.base, "code=good-code&state=forged").await;

    assert!(page.contains("state mismatch"));
    assert_eq!(hits.count(), 0);
    assert!(
        server
            .state
            .pending
            .lock()
            .await
            .as_ref()
            .is_some_and(|p| p.account.is_none())
    );
}

#[tokio::test]
async fn test_callback_reports_denied_access() {
    let hits = Hits::default();
    let token_url = code_exchange_server(hits.clone()).await;
    let server = start(&token_url, pending("expected-state")).await;

    let page = callback(&server.base, "error=access_denied&state=expected-state").await;

    assert!(page.contains("denied"));
    assert_eq!(hits.count(), 0);
}

#[tokio::test]
async fn test_callback_with_rejected_code_leaves_sign_in_pending() {
    let hits = Hits::default();
    let token_url = code_exchange_server(hits.clone()).await;
    let server = start(&token_url, pending("expected-state")).await;

    let page = callback(&server.base, "code=bad-code&state=expected-state").await;

    assert!(page.contains("Login failed"));
    assert_eq!(hits.count(), 1);
    assert_eq!(health(&server.base).await["sign_in"], "pending");
}

#[tokio::test]
async fn test_health_without_sign_in() {
    let server = start("http://127.0.0.1:1/api/token", None).await;

    let health = health(&server.base).await;

    assert_eq!(health["sign_in"], "idle");
    assert_eq!(health["name"], "spotdash");
    assert_eq!(
        callback(&server.base, "code=good-code&state=any").await,
        "<h4>No sign-in in progress.</h4>"
    );
}
