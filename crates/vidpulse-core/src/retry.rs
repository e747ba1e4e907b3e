//! Retry with exponential back-off and jitter.
//!
//! A single [`RetryPolicy`] is shared by every external call site (YouTube
//! Data API, sentiment inference, report generation). Each call site supplies
//! its own transient-error predicate, so non-transient errors are returned
//! immediately without burning attempts.

use std::future::Future;
use std::time::Duration;

/// Back-off parameters for one external call site.
///
/// `max_attempts` is the total number of attempts, including the first.
/// The sleep before attempt `n+1` is `base_delay_ms × multiplier^(n-1)`,
/// capped at 60 s, with ±25 % jitter.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub multiplier: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, base_delay_ms: u64, multiplier: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
            multiplier,
        }
    }

    /// Runs `operation`, retrying on errors for which `is_transient` returns
    /// `true`, up to [`RetryPolicy::max_attempts`] total attempts.
    ///
    /// # Errors
    ///
    /// Returns the last error once attempts are exhausted, or the first
    /// non-transient error immediately.
    pub async fn run<T, E, F, Fut, P>(&self, is_transient: P, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        const MAX_DELAY_MS: u64 = 60_000;
        let mut attempt = 1u32;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !is_transient(&err) || attempt >= self.max_attempts.max(1) {
                        return Err(err);
                    }
                    let exponent = u32::min(attempt - 1, 10);
                    let computed = self
                        .base_delay_ms
                        .saturating_mul(self.multiplier.saturating_pow(exponent));
                    let capped = computed.min(MAX_DELAY_MS);
                    #[allow(
                        clippy::cast_possible_truncation,
                        clippy::cast_sign_loss,
                        clippy::cast_precision_loss
                    )]
                    let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms,
                        error = %err,
                        "transient error — retrying after back-off"
                    );
                    attempt += 1;
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}
