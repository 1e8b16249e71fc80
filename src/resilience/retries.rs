//! Retry with geometric backoff.
//!
//! The operation decides what is transient: it returns [`Attempt::Retry`] to
//! ask for another try. Any `Err` it returns is final.

use std::future::Future;
use std::time::Duration;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::resilience::backoff::Backoff;

/// Outcome of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T> {
    /// Finished; return this value.
    Ready(T),
    /// Transient condition; try again after the next backoff delay.
    Retry,
}

/// Attempt budget and backoff shape for [`retry_with_backoff`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_interval: Duration,
    pub multiplier: f64,
}

impl RetryPolicy {
    pub async fn run<T, F, Fut>(&self, operation: F) -> BlockchainResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = BlockchainResult<Attempt<T>>>,
    {
        retry_with_backoff(
            self.max_attempts,
            self.initial_interval,
            self.multiplier,
            operation,
        )
        .await
    }
}

/// Invoke `operation` up to `max_attempts` times.
///
/// After an `Attempt::Retry` the task sleeps for the current interval, which
/// is then multiplied by `multiplier`. No sleep follows the final attempt.
pub async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    initial_interval: Duration,
    multiplier: f64,
    mut operation: F,
) -> BlockchainResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = BlockchainResult<Attempt<T>>>,
{
    let mut backoff = Backoff::new(initial_interval, multiplier);

    for attempt in 1..=max_attempts {
        match operation().await? {
            Attempt::Ready(value) => return Ok(value),
            Attempt::Retry if attempt < max_attempts => {
                let delay = backoff.next_delay();
                tracing::debug!(attempt, delay = ?delay, "Retrying after transient condition");
                tokio::time::sleep(delay).await;
            }
            Attempt::Retry => {}
        }
    }

    Err(BlockchainError::Timeout(format!(
        "Exceeded maximum retries ({})",
        max_attempts
    )))
}
