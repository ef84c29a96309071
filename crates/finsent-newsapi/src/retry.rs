//! Which NewsAPI failures are retried.
//!
//! Only transient failures (network errors and 5xx) are retried. Rate
//! limits, API errors and malformed bodies are returned at once: repeating
//! the request would only burn quota.

use std::future::Future;

use crate::error::NewsApiError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
pub(crate) fn is_retriable(err: &NewsApiError) -> bool {
    match err {
        NewsApiError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        NewsApiError::Server { .. } => true,
        NewsApiError::Api { .. }
        | NewsApiError::RateLimited(_)
        | NewsApiError::Deserialize { .. }
        | NewsApiError::Config(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    operation: F,
) -> Result<T, NewsApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, NewsApiError>>,
{
    finsent_core::retry::retry_with_backoff(
        "newsapi",
        max_retries,
        backoff_base_ms,
        is_retriable,
        operation,
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn server_err() -> NewsApiError {
        NewsApiError::Server {
            status: 502,
            message: "bad gateway".to_owned(),
        }
    }

    #[test]
    fn rate_limit_is_not_retriable() {
        assert!(!is_retriable(&NewsApiError::RateLimited("quota".to_owned())));
    }

    #[test]
    fn api_error_is_not_retriable() {
        assert!(!is_retriable(&NewsApiError::Api {
            status: 401,
            code: "apiKeyInvalid".to_owned(),
            message: "bad key".to_owned(),
        }));
    }

    #[test]
    fn server_error_is_retriable() {
        assert!(is_retriable(&server_err()));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, NewsApiError>(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_server_errors_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err(server_err())
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(server_err())
            }
        })
        .await;
        assert!(matches!(result, Err(NewsApiError::Server { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_rate_limit() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(NewsApiError::RateLimited("quota".to_owned()))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(NewsApiError::RateLimited(_))));
    }
}
