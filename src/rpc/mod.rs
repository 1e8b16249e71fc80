//! RPC transport subsystem.
//!
//! # Data Flow
//! ```text
//! Reader / Writer
//!     → RpcClient trait (one method per route)
//!     → http.rs (borsh body over HTTP POST, per-call timeout)
//!     → messages.rs (typed request/response pairs)
//! ```
//!
//! Reader and Writer hold an `Arc<dyn RpcClient>`, so tests and alternative
//! transports plug in without touching either.

pub mod http;
pub mod messages;

use async_trait::async_trait;

use crate::blockchain::types::BlockchainResult;
pub use http::HttpRpcClient;
pub use messages::*;

/// Request/response operations exposed by a node.
#[async_trait]
pub trait RpcClient: Send + Sync {
    /// Accounts, optional contract bytecode and storage values.
    async fn state(&self, request: StateRequest) -> BlockchainResult<StateResponse>;

    async fn block(&self, request: BlockRequest) -> BlockchainResult<BlockResponse>;

    async fn block_hash_by_height(
        &self,
        request: BlockHashByHeightRequest,
    ) -> BlockchainResult<BlockHashByHeightResponse>;

    async fn highest_committed_block(&self) -> BlockchainResult<HighestCommittedBlockResponse>;

    async fn transaction(&self, request: TransactionRequest)
        -> BlockchainResult<TransactionResponse>;

    /// Receipt and position of a transaction, once committed.
    async fn receipt(&self, request: TransactionPositionRequest)
        -> BlockchainResult<ReceiptResponse>;

    async fn submit_transaction(
        &self,
        request: SubmitTransactionRequest,
    ) -> BlockchainResult<SubmitTransactionResponse>;

    async fn view(&self, request: ViewRequest) -> BlockchainResult<ViewResponse>;
}
