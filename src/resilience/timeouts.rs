//! Per-call deadlines for RPC round-trips.

use std::future::Future;
use std::time::Duration;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Run `fut`, failing with `RpcTimeout` if it does not finish within `duration`.
pub async fn with_timeout<T, Fut>(duration: Duration, fut: Fut) -> BlockchainResult<T>
where
    Fut: Future<Output = BlockchainResult<T>>,
{
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => {
            let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
            Err(BlockchainError::RpcTimeout(millis))
        }
    }
}
