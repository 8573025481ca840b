//! Retry helper shared by the collector
//!
//! A [`RetryPolicy`] re-runs a fallible async operation in place, one attempt
//! at a time, sleeping between attempts. When the budget runs out the last
//! error is wrapped in [`Error::FetchFailed`].

use crate::cancel::CancelSignal;
use crate::config::RetryConfig;
use crate::error::{Error, Result};
use crate::types::BackoffType;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// How often and how patiently to retry a failed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Base delay between attempts
    pub delay: Duration,
    /// How the delay grows with each attempt
    pub backoff: BackoffType,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    /// Two retries, two seconds apart
    fn default() -> Self {
        Self::fixed(2, Duration::from_secs(2))
    }
}

impl RetryPolicy {
    /// Constant delay between a fixed number of retries
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            backoff: BackoffType::Constant,
            max_delay: delay,
        }
    }

    /// A single attempt, no retries
    pub fn none() -> Self {
        Self::fixed(0, Duration::ZERO)
    }

    /// Set the backoff strategy
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffType, max_delay: Duration) -> Self {
        self.backoff = backoff;
        self.max_delay = max_delay;
        self
    }

    /// Total attempts including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay to wait after the given zero-based failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay = match self.backoff {
            BackoffType::Constant => self.delay,
            BackoffType::Linear => self.delay.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.delay.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.max_delay.max(self.delay))
    }

    /// Run `op` until it succeeds or the retry budget is spent
    ///
    /// Every error except `Cancelled` is retried. Cancellation is also
    /// observed while waiting between attempts.
    pub async fn run<T, F, Fut>(&self, cancel: &CancelSignal, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 0;

        loop {
            match cancel.guard(op()).await {
                Ok(value) => return Ok(value),
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_attempts {
                        return Err(Error::fetch_failed(attempt, e));
                    }

                    let delay = self.delay_for(attempt - 1);
                    warn!(
                        "Request failed ({}), attempt {}/{}, retrying in {:?}",
                        e, attempt, max_attempts, delay
                    );
                    cancel.sleep(delay).await?;
                }
            }
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: Duration::from_millis(config.delay_ms),
            backoff: config.backoff,
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }
}
