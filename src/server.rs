use std::{io, net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{sync::oneshot, task::JoinHandle};

use crate::{api, config, spotify::auth::SignInState, warning};

/// Binds the local callback server and serves it in the background until
/// `shutdown` fires.
pub async fn start_api_server(
    addr: &str,
    state: Arc<SignInState>,
    shutdown: oneshot::Receiver<()>,
) -> Result<JoinHandle<()>, io::Error> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route(config::CALLBACK_PATH, get(api::callback))
        .layer(Extension(state));

    let addr = SocketAddr::from_str(addr)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Ok(tokio::spawn(async move {
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown.await;
            })
            .await;
        if let Err(e) = served {
            warning!("Callback server stopped unexpectedly: {}", e);
        }
    }))
}
