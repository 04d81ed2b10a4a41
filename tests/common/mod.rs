#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::Router;
use chrono::Utc;
use serde_json::{Value, json};
use spotdash::{
    session::{Credential, SessionManager},
    spotify::{SpotifyClient, auth::OAuthClient},
};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn oauth(token_url: &str) -> OAuthClient {
    OAuthClient::new(
        CLIENT_ID.to_string(),
        CLIENT_SECRET.to_string(),
        token_url.to_string(),
    )
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn credential(access_token: &str, expires_in_ms: i64) -> Credential {
    Credential {
        access_token: access_token.to_string(),
        refresh_token: "refresh-token".to_string(),
        expires_at: now_ms() + expires_in_ms,
        error: None,
    }
}

/// Client for the fake API at `api_url` with a token valid for an hour.
/// The token endpoint is unreachable, so any refresh would fail.
pub fn client(api_url: &str) -> SpotifyClient {
    let session = SessionManager::new(oauth("http://127.0.0.1:1/api/token"))
        .with_credential(credential("fresh-token", 3_600_000));
    SpotifyClient::new(Arc::new(session), api_url)
}

pub fn track_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Track {}", id),
        "uri": format!("spotify:track:{}", id),
        "duration_ms": 185000,
        "artists": [{ "id": format!("{}-artist", id), "name": "Someone" }],
        "album": { "id": "album", "name": "Album" }
    })
}

pub fn artist_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Artist {}", id),
        "genres": ["indie"],
        "popularity": 50,
        "followers": { "total": 1000 }
    })
}

pub fn playlist_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Playlist {}", id),
        "description": "",
        "public": false,
        "collaborative": false,
        "snapshot_id": "snap",
        "owner": { "id": "me", "display_name": "Me" },
        "tracks": { "total": 3 }
    })
}

pub fn spotify_error(status: u16, message: &str) -> Value {
    json!({ "error": { "status": status, "message": message } })
}
