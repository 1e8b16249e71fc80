//! Bounded polling at a fixed interval.

use std::future::Future;
use std::time::Duration;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Attempt budget and interval for [`poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollPolicy {
    /// Longest time a poll under this policy can wait between probes in total.
    pub fn ceiling(&self) -> Duration {
        self.interval
            .saturating_mul(self.max_attempts.saturating_sub(1))
    }

    pub async fn run<T, F, Fut, D>(&self, probe: F, is_done: D) -> BlockchainResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = BlockchainResult<T>>,
        D: Fn(&T) -> bool,
    {
        poll(self.max_attempts, self.interval, probe, is_done).await
    }
}

/// Invoke `probe` until `is_done` accepts its result, at most `max_attempts` times.
///
/// The first probe runs immediately; `interval` is slept only between probes.
/// Errors from `probe` propagate at once.
pub async fn poll<T, F, Fut, D>(
    max_attempts: u32,
    interval: Duration,
    mut probe: F,
    is_done: D,
) -> BlockchainResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = BlockchainResult<T>>,
    D: Fn(&T) -> bool,
{
    for attempt in 1..=max_attempts {
        let result = probe().await?;
        if is_done(&result) {
            return Ok(result);
        }
        if attempt < max_attempts {
            tracing::debug!(attempt, max_attempts, "Condition not met, polling again");
            tokio::time::sleep(interval).await;
        }
    }

    Err(BlockchainError::Timeout(format!(
        "Exceeded maximum polling attempts ({})",
        max_attempts
    )))
}
