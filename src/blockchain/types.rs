//! Error definitions shared by the builder, reader and writer.

use thiserror::Error;

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Caller input violates a local invariant. Raised before any network I/O.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The network rejected the transaction nonce; fetch a fresh one and rebuild.
    #[error("Nonce error: {0}")]
    Nonce(String),

    /// A trusted collaborator returned a structurally impossible response.
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// The requested entity does not exist where the query requires it to.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bounded retry or poll used up its attempts. The outcome is unknown,
    /// not failed.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// The transaction was confirmed but did not execute successfully.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// RPC connection, status or decoding failure.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// A single RPC request exceeded its deadline, in milliseconds.
    #[error("RPC timeout after {0} ms")]
    RpcTimeout(u64),

    /// Key material could not be parsed.
    #[error("Wallet error: {0}")]
    Wallet(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlockchainError::RpcTimeout(10_000);
        assert_eq!(err.to_string(), "RPC timeout after 10000 ms");

        let err = BlockchainError::Nonce("Nonce is no longer valid".to_string());
        assert!(err.to_string().starts_with("Nonce error"));

        let err = BlockchainError::Timeout("Exceeded maximum polling attempts (3)".to_string());
        assert!(err.to_string().contains("(3)"));
    }
}
