use std::future::Future;

use crate::{
    spotify::error::{ApiError, ApiErrorKind, Operation, RemoteFailure, extract_message, normalize},
    warning,
};

/// Genres offered when the genre seed endpoint is unavailable.
pub const FALLBACK_GENRES: [&str; 20] = [
    "acoustic",
    "alternative",
    "ambient",
    "blues",
    "classical",
    "country",
    "dance",
    "electronic",
    "folk",
    "hip-hop",
    "house",
    "indie",
    "jazz",
    "metal",
    "pop",
    "punk",
    "r-n-b",
    "reggae",
    "rock",
    "soul",
];

pub fn fallback_genres() -> Vec<String> {
    FALLBACK_GENRES.iter().map(|g| g.to_string()).collect()
}

/// Describes one call issued through [`call`]: which operation it is and
/// what, if anything, replaces a "not found" answer.
pub struct CallContext<T> {
    operation: Operation,
    on_not_found: Option<fn() -> T>,
}

impl<T> CallContext<T> {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            on_not_found: None,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

impl CallContext<Vec<String>> {
    /// Context of the genre seed listing, which recovers from a 404 with
    /// [`FALLBACK_GENRES`].
    pub fn available_genres() -> Self {
        Self {
            operation: Operation::AvailableGenres,
            on_not_found: Some(fallback_genres),
        }
    }
}

impl<T> From<Operation> for CallContext<T> {
    fn from(operation: Operation) -> Self {
        Self::new(operation)
    }
}

/// Executes one remote operation and normalizes its failure.
///
/// A successful result is returned unchanged. A failure is logged with the
/// operation, status and message and turned into an [`ApiError`], except
/// for a 404 on a context that carries a replacement value, which is
/// returned instead. Unauthorized failures are reported, never retried;
/// reacting to them is up to [`crate::session::policy`].
///
/// # Example
///
/// ```
/// let genres = call(CallContext::available_genres(), || async {
///     Err(RemoteFailure::with_status(404))
/// })
/// .await?;
/// assert_eq!(genres.len(), FALLBACK_GENRES.len());
/// ```
pub async fn call<T, F, Fut>(context: CallContext<T>, remote: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, RemoteFailure>>,
{
    let failure = match remote().await {
        Ok(value) => return Ok(value),
        Err(failure) => failure,
    };

    let error = normalize(context.operation, &failure);
    warning!(
        "Spotify API error in {} (status {}): {}",
        context.operation,
        error.source_status,
        extract_message(&failure)
    );

    if error.kind == ApiErrorKind::NotFound {
        if let Some(replacement) = context.on_not_found {
            return Ok(replacement());
        }
    }

    Err(error)
}
