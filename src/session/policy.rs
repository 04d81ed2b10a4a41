use std::future::Future;

use crate::spotify::error::{ApiError, ApiErrorKind};

/// Applies the re-authentication policy to the result of a remote call.
///
/// When the call failed with [`ApiErrorKind::Unauthorized`] the
/// `reauthenticate` action runs once before the error is handed back. The
/// failed call is not retried; the caller issues it again once signed in.
/// Any other result passes through untouched.
pub async fn enforce<T, R, Fut>(result: Result<T, ApiError>, reauthenticate: R) -> Result<T, ApiError>
where
    R: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    if let Err(e) = &result {
        if e.kind == ApiErrorKind::Unauthorized {
            reauthenticate().await;
        }
    }
    result
}
