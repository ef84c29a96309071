//! Retry with exponential back-off and jitter, shared by every outbound
//! HTTP call in the pipeline.
//!
//! Callers decide which of their errors are transient; everything else is
//! returned on the first failure.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Upper bound on a single back-off delay.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Delay before retry number `attempt` (1-based).
///
/// `backoff_base_ms × 2ⁿ⁻¹`, capped at [`MAX_DELAY_MS`], then scaled by a
/// random factor in `[0.75, 1.25)`.
#[must_use]
pub fn backoff_delay(backoff_base_ms: u64, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(10);
    let capped = backoff_base_ms
        .saturating_mul(1u64 << exponent)
        .min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
    Duration::from_millis(delay_ms)
}

/// Runs `operation` with up to `max_retries` additional attempts while
/// `is_retriable` accepts the error.
///
/// `target` names the remote resource in the retry log lines.
///
/// # Errors
///
/// Returns the last error once it is not retriable or retries run out.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    target: &str,
    max_retries: u32,
    backoff_base_ms: u64,
    is_retriable: R,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    R: Fn(&E) -> bool,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay = backoff_delay(backoff_base_ms, attempt);
                tracing::warn!(
                    target_resource = target,
                    attempt,
                    max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient error, retrying after back-off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
