mod common;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Router, http::StatusCode, routing::get};
use spotdash::{
    session::{SessionError, policy},
    spotify::{
        call::{CallContext, FALLBACK_GENRES, call},
        error::{
            ApiError, ApiErrorKind, NOT_FOUND_MESSAGE, Operation, ProviderError,
            ProviderErrorBody, RATE_LIMITED_MESSAGE, RemoteFailure, UNAUTHORIZED_MESSAGE,
            UNKNOWN_MESSAGE, extract_message, extract_status, normalize,
        },
    },
};

use common::serve;

fn body(status: Option<u16>, message: Option<&str>) -> ProviderErrorBody {
    ProviderErrorBody {
        error: ProviderError {
            status,
            message: message.map(str::to_string),
        },
    }
}

async fn fail_with<T>(context: CallContext<T>, failure: RemoteFailure) -> Result<T, ApiError> {
    call(context, || async move { Err::<T, _>(failure) }).await
}

#[tokio::test]
async fn test_success_passes_through() {
    let result = call(Operation::TopTracks.into(), || async {
        Ok::<_, RemoteFailure>(vec![1, 2, 3])
    })
    .await;

    assert_eq!(result.unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let attempts = AtomicUsize::new(0);

    let err = call::<(), _, _>(Operation::CurrentUserProfile.into(), || async {
        attempts.fetch_add(1, Ordering::SeqCst);
        Err::<(), _>(RemoteFailure::with_status(401).with_message("The access token expired"))
    })
    .await
    .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert_eq!(err.message, UNAUTHORIZED_MESSAGE);
    assert_eq!(err.source_status, 401);
    assert_eq!(err.operation, Operation::CurrentUserProfile);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_genre_listing_recovers_from_not_found() {
    let genres = fail_with(CallContext::available_genres(), RemoteFailure::with_status(404))
        .await
        .unwrap();

    assert_eq!(genres.len(), 20);
    assert_eq!(genres, FALLBACK_GENRES.map(String::from).to_vec());
}

#[tokio::test]
async fn test_genre_listing_recovers_from_not_found_in_body() {
    let failure = RemoteFailure::from_body(body(Some(404), Some("Not found.")));

    let genres = fail_with(CallContext::available_genres(), failure).await.unwrap();

    assert_eq!(genres.first().map(String::as_str), Some("acoustic"));
    assert_eq!(genres.last().map(String::as_str), Some("soul"));
}

#[tokio::test]
async fn test_genre_listing_surfaces_other_errors() {
    let err = fail_with(CallContext::available_genres(), RemoteFailure::with_status(503))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Unknown);
    assert_eq!(err.source_status, 503);
}

#[tokio::test]
async fn test_not_found_elsewhere_is_an_error() {
    let err = fail_with::<Vec<String>>(Operation::Artist.into(), RemoteFailure::with_status(404))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::NotFound);
    assert_eq!(err.message, NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_rate_limit_asks_to_retry_later() {
    let err = fail_with::<()>(Operation::TopArtists.into(), RemoteFailure::with_status(429))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::RateLimited);
    assert_eq!(err.message, RATE_LIMITED_MESSAGE);
    assert!(err.message.contains("retry later"));
}

#[tokio::test]
async fn test_other_status_keeps_provider_message() {
    let failure = RemoteFailure::from_response(
        503,
        r#"{"error": {"status": 503, "message": "Service unavailable"}}"#,
    );

    let err = fail_with::<()>(Operation::Recommendations.into(), failure)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Unknown);
    assert_eq!(err.message, "Service unavailable");
    assert_eq!(err.source_status, 503);
}

#[test]
fn test_direct_status_wins_over_body() {
    let failure = RemoteFailure {
        status: Some(429),
        body: Some(body(Some(404), None)),
        ..Default::default()
    };

    assert_eq!(extract_status(&failure), 429);
}

#[test]
fn test_body_status_used_without_direct_status() {
    let failure = RemoteFailure::from_body(body(Some(401), Some("Invalid access token")));

    let err = normalize(Operation::TopTracks, &failure);

    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert_eq!(err.source_status, 401);
}

#[test]
fn test_defaults_without_any_information() {
    let failure = RemoteFailure::default();

    assert_eq!(extract_status(&failure), 500);
    assert_eq!(extract_message(&failure), UNKNOWN_MESSAGE);

    let err = normalize(Operation::PlaylistTracks, &failure);
    assert_eq!(err.kind, ApiErrorKind::Unknown);
    assert_eq!(err.message, UNKNOWN_MESSAGE);
}

#[test]
fn test_direct_message_wins_over_body() {
    let failure = RemoteFailure {
        message: Some("direct".to_string()),
        body: Some(body(None, Some("from body"))),
        ..Default::default()
    };

    assert_eq!(extract_message(&failure), "direct");
    assert_eq!(
        extract_message(&RemoteFailure::from_body(body(None, Some("from body")))),
        "from body"
    );
}

#[test]
fn test_non_json_error_body_is_ignored() {
    let failure = RemoteFailure::from_response(502, "<html>Bad Gateway</html>");

    let err = normalize(Operation::UserPlaylists, &failure);

    assert_eq!(err.source_status, 502);
    assert_eq!(err.message, UNKNOWN_MESSAGE);
}

#[test]
fn test_session_errors_are_unauthorized() {
    let failure = RemoteFailure::from(SessionError::ReauthenticationRequired);

    let err = normalize(Operation::TopTracks, &failure);

    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert_eq!(err.source_status, 401);
}

#[tokio::test]
async fn test_transport_status_is_used_last() {
    let base = serve(Router::new().route(
        "/broken",
        get(|| async { StatusCode::BAD_GATEWAY }),
    ))
    .await;

    let err = call::<(), _, _>(Operation::TopTracks.into(), || async {
        reqwest::get(format!("{}/broken", base))
            .await?
            .error_for_status()?;
        Ok::<(), RemoteFailure>(())
    })
    .await
    .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Unknown);
    assert_eq!(err.source_status, 502);
}

#[tokio::test]
async fn test_unreachable_host_is_unknown() {
    let err = call::<(), _, _>(Operation::TopTracks.into(), || async {
        reqwest::get("http://127.0.0.1:1/").await?;
        Ok::<(), RemoteFailure>(())
    })
    .await
    .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Unknown);
    assert_eq!(err.source_status, 500);
    assert_ne!(err.message, UNKNOWN_MESSAGE);
}

#[tokio::test]
async fn test_policy_reauthenticates_on_unauthorized() {
    let reauths = Arc::new(AtomicUsize::new(0));
    let result = fail_with::<()>(Operation::TopTracks.into(), RemoteFailure::with_status(401)).await;

    let counter = Arc::clone(&reauths);
    let result = policy::enforce(result, || async move {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .await;

    assert_eq!(result.unwrap_err().kind, ApiErrorKind::Unauthorized);
    assert_eq!(reauths.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_policy_ignores_other_results() {
    let reauths = Arc::new(AtomicUsize::new(0));

    let not_found = fail_with::<()>(Operation::Artist.into(), RemoteFailure::with_status(404)).await;
    let counter = Arc::clone(&reauths);
    let not_found = policy::enforce(not_found, || async move {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .await;

    let counter = Arc::clone(&reauths);
    let ok = policy::enforce(Ok::<_, ApiError>(7), || async move {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .await;

    assert_eq!(not_found.unwrap_err().kind, ApiErrorKind::NotFound);
    assert_eq!(ok.unwrap(), 7);
    assert_eq!(reauths.load(Ordering::SeqCst), 0);
}
