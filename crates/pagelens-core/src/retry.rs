//! Retry policy and the backoff loop.
//!
//! Each attempt reports a [`RetryDecision`]; [`retry_with_backoff`] acts on
//! it, sleeping `base_delay * 2^attempt` between transient failures.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub max_retries: u32,
    /// Delay before the second attempt; doubles after each further failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay to wait after failed attempt number `attempt` (zero-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor)
    }
}

/// Outcome of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision<T, E> {
    /// Done; return this value.
    Succeed(T),
    /// Failed in a way that will recur; stop now.
    Abort(E),
    /// Failed transiently; try again if attempts remain.
    Retry(String),
}

/// Why the loop stopped without a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryFailure<E> {
    Aborted(E),
    Exhausted { attempts: u32, last_reason: String },
}

/// Run `attempt_fn` until it succeeds, aborts, or the policy runs out.
///
/// `attempt_fn` receives the zero-based attempt number.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut attempt_fn: F,
) -> Result<T, RetryFailure<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = RetryDecision<T, E>>,
{
    let mut last_reason = String::from("no attempts made");

    for attempt in 0..policy.max_retries {
        match attempt_fn(attempt).await {
            RetryDecision::Succeed(value) => return Ok(value),
            RetryDecision::Abort(err) => return Err(RetryFailure::Aborted(err)),
            RetryDecision::Retry(reason) => {
                warn!(
                    "Attempt {}/{} failed: {}",
                    attempt + 1,
                    policy.max_retries,
                    reason
                );
                last_reason = reason;
            }
        }

        if attempt + 1 < policy.max_retries {
            let delay = policy.delay_for_attempt(attempt);
            info!("Waiting {:?} before retrying...", delay);
            sleep(delay).await;
        }
    }

    error!("Request failed after {} attempts.", policy.max_retries);
    Err(RetryFailure::Exhausted {
        attempts: policy.max_retries,
        last_reason,
    })
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
