//! Bounded retry with backoff
//!
//! Attempts run one after another, never concurrently. Between attempt `n`
//! and `n + 1` the caller sleeps for:
//! - `base` with no backoff
//! - `base * n` with linear backoff
//! - `base * 2^(n-1)` with exponential backoff

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use reactions_common::{BackoffMode, PerformanceConfig, ReactionsError};
use tracing::{debug, warn};

/// Tells the executor whether an error is worth retrying
pub trait RetryClassify {
    /// `true` if the error must propagate immediately
    fn is_fatal(&self) -> bool;
}

impl RetryClassify for ReactionsError {
    /// Authentication failures and non-retryable network failures stop the
    /// loop; anything else is retried.
    fn is_fatal(&self) -> bool {
        match self {
            Self::Authentication(_) => true,
            Self::Network { retryable, .. } => !retryable,
            Self::Validation(_) | Self::Domain(_) => false,
        }
    }
}

/// Retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub backoff: BackoffMode,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&PerformanceConfig::default())
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, backoff: BackoffMode) -> Self {
        Self {
            max_attempts,
            base_delay,
            backoff,
        }
    }

    /// Policy described by the performance knobs
    pub fn from_config(config: &PerformanceConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay(), config.retry_backoff)
    }

    /// A single attempt, no waiting
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO, BackoffMode::None)
    }

    /// Sleep between attempt `attempt` (1-based) and the next one
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        match self.backoff {
            BackoffMode::None => self.base_delay,
            BackoffMode::Linear => self.base_delay.saturating_mul(attempt),
            BackoffMode::Exponential => self
                .base_delay
                .saturating_mul(2_u32.saturating_pow(attempt - 1)),
        }
    }
}

/// Run `operation` under `policy`.
///
/// The closure receives the 1-based attempt number. The last error is
/// returned once attempts are exhausted or a fatal error occurs.
pub async fn with_retry<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryClassify + Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) if attempt >= max_attempts => {
                warn!(attempt, error = %e, "Retries exhausted");
                return Err(e);
            }
            Err(e) => {
                let delay = policy.delay_after(attempt);
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
