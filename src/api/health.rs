use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::spotify::auth::SignInState;

pub async fn health(Extension(sign_in): Extension<Arc<SignInState>>) -> Json<Value> {
    let sign_in = match sign_in.pending.lock().await.as_ref() {
        Some(pending) if pending.account.is_some() => "complete",
        Some(_) => "pending",
        None => "idle",
    };

    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "sign_in": sign_in,
    }))
}
