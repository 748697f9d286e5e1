//! Throttling-aware retry around single destination mutations.
//!
//! Every attempt, including the first, waits a fixed pre-call delay. Only
//! [`ShopifyError::RateLimited`] is retried; any other failure propagates
//! immediately.

use std::future::Future;
use std::time::Duration;

use shopsync_shopify::ShopifyError;

/// Timing and bounds for [`call_with_retry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait before every attempt.
    pub pre_call_delay: Duration,
    /// Retries after the first attempt; the call is tried at most
    /// `max_retries + 1` times.
    pub max_retries: u32,
    pub backoff_base: Duration,
    /// Added to every backoff wait.
    pub backoff_padding: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            pre_call_delay: Duration::from_millis(500),
            max_retries: 5,
            backoff_base: Duration::from_millis(2000),
            backoff_padding: Duration::from_millis(700),
        }
    }
}

impl RetryPolicy {
    /// Wait after throttled attempt `attempt` (1-based):
    /// `backoff_base * 2^(attempt - 1) + backoff_padding`.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.backoff_base
            .saturating_mul(factor)
            .saturating_add(self.backoff_padding)
    }
}

fn as_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// Runs `operation` under `policy`.
///
/// On a throttled attempt `n <= max_retries` the call sleeps
/// [`RetryPolicy::backoff_delay`]`(n)` and tries again; throttling on attempt
/// `max_retries + 1` is returned to the caller unchanged. `sku` only labels
/// the log lines.
///
/// # Errors
///
/// The last error from `operation`.
pub async fn call_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    sku: &str,
    mut operation: F,
) -> Result<T, ShopifyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ShopifyError>>,
{
    let mut attempt = 1u32;

    loop {
        tokio::time::sleep(policy.pre_call_delay).await;

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_rate_limited() && attempt <= policy.max_retries => {
                let delay = policy.backoff_delay(attempt);
                tracing::warn!(
                    sku,
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = as_millis(delay),
                    retry_after_secs = err.retry_after_secs(),
                    "throttled by destination; retrying after backoff"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
