//! Read path: accounts, blocks and transactions.
//!
//! # Responsibilities
//! - Issue one RPC query per lookup against a single endpoint
//! - Turn valid "absent" outcomes into `None` or zero
//! - Reject structurally impossible responses with `Integrity`
//!
//! Nothing is cached and nothing is retried here.

use std::sync::Arc;

use serde::Serialize;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::primitives::{Account, Block, Receipt, Sha256Hash, SignedTx, ToAddress, ToHash};
use crate::rpc::messages::*;
use crate::rpc::{HttpRpcClient, RpcClient};

/// Block selector accepted by [`Reader::get_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockId {
    Height(u64),
    Hash(Sha256Hash),
    /// Base64url-encoded block hash.
    Encoded(String),
}

impl From<u64> for BlockId {
    fn from(height: u64) -> Self {
        BlockId::Height(height)
    }
}

impl From<Sha256Hash> for BlockId {
    fn from(hash: Sha256Hash) -> Self {
        BlockId::Hash(hash)
    }
}

impl From<&str> for BlockId {
    fn from(encoded: &str) -> Self {
        BlockId::Encoded(encoded.to_string())
    }
}

impl From<String> for BlockId {
    fn from(encoded: String) -> Self {
        BlockId::Encoded(encoded)
    }
}

/// A committed transaction with its receipt and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionResult {
    pub transaction: SignedTx,
    pub receipt: Receipt,
    pub block_hash: Sha256Hash,
    pub position: u32,
}

/// Query client for chain state.
#[derive(Clone)]
pub struct Reader {
    client: Arc<dyn RpcClient>,
}

impl Reader {
    /// Create a reader talking HTTP to `endpoint`.
    pub fn new(endpoint: &str) -> BlockchainResult<Self> {
        Ok(Self::with_client(Arc::new(HttpRpcClient::new(endpoint)?)))
    }

    pub fn with_client(client: Arc<dyn RpcClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<dyn RpcClient> {
        &self.client
    }

    /// Balance of `address`; an account with no history has balance zero.
    pub async fn get_account_balance(&self, address: impl ToAddress) -> BlockchainResult<u64> {
        let account = self.get_account(address, false).await?;
        Ok(account.map_or(0, |account| account.balance()))
    }

    /// Next nonce of `address`; an account with no history has nonce zero.
    pub async fn get_account_nonce(&self, address: impl ToAddress) -> BlockchainResult<u64> {
        let account = self.get_account(address, false).await?;
        Ok(account.map_or(0, |account| account.nonce()))
    }

    /// Deployed bytecode, or `None` for accounts without a contract.
    pub async fn get_contract_code(
        &self,
        address: impl ToAddress,
    ) -> BlockchainResult<Option<Vec<u8>>> {
        let account = self.get_account(address, true).await?;
        Ok(account.and_then(|account| account.contract().map(<[u8]>::to_vec)))
    }

    async fn get_account(
        &self,
        address: impl ToAddress,
        include_contract: bool,
    ) -> BlockchainResult<Option<Account>> {
        let address = address.to_address()?;

        let response = self
            .client
            .state(StateRequest {
                accounts: vec![address],
                include_contract,
                storage_keys: Vec::new(),
            })
            .await?;

        let accounts = response.accounts.ok_or_else(|| {
            BlockchainError::Integrity("State response is missing the accounts field".to_string())
        })?;

        match accounts.into_iter().find(|(key, _)| key == &address) {
            None => Ok(None),
            Some((_, Some(account))) => Ok(Some(account)),
            Some((_, None)) => Err(BlockchainError::Integrity(format!(
                "Account {} has neither a contract nor a plain account shape",
                address
            ))),
        }
    }

    /// Fetch a block by height or hash. `None` if no block has that hash.
    ///
    /// # Errors
    /// - `NotFound` if a height is given and the node knows no block there
    /// - `Validation` if an encoded hash does not decode to 32 bytes
    pub async fn get_block(&self, id: impl Into<BlockId>) -> BlockchainResult<Option<Block>> {
        let block_hash = match id.into() {
            BlockId::Height(height) => self.resolve_height(height).await?,
            BlockId::Hash(hash) => hash,
            BlockId::Encoded(encoded) => encoded.to_hash()?,
        };
        self.fetch_block(block_hash).await
    }

    /// The most recent committed block.
    pub async fn get_latest_committed_block(&self) -> BlockchainResult<Block> {
        let block_hash = self
            .client
            .highest_committed_block()
            .await?
            .block_hash
            .ok_or_else(|| {
                BlockchainError::Integrity("Node reported no highest committed block".to_string())
            })?;

        self.fetch_block(block_hash).await?.ok_or_else(|| {
            BlockchainError::Integrity(format!(
                "Highest committed block {} could not be fetched",
                block_hash
            ))
        })
    }

    /// A committed transaction with receipt, block hash and position.
    ///
    /// Returns `None` unless all four are present in the response.
    pub async fn get_transaction(
        &self,
        hash: impl ToHash,
    ) -> BlockchainResult<Option<TransactionResult>> {
        let transaction_hash = hash.to_hash()?;

        let response = self
            .client
            .transaction(TransactionRequest {
                transaction_hash,
                include_receipt: true,
            })
            .await?;

        match response {
            TransactionResponse {
                transaction: Some(transaction),
                receipt: Some(receipt),
                block_hash: Some(block_hash),
                position: Some(position),
            } => Ok(Some(TransactionResult {
                transaction,
                receipt,
                block_hash,
                position,
            })),
            _ => {
                tracing::debug!(tx_hash = %transaction_hash, "Transaction not found or incomplete");
                Ok(None)
            }
        }
    }

    async fn resolve_height(&self, height: u64) -> BlockchainResult<Sha256Hash> {
        self.client
            .block_hash_by_height(BlockHashByHeightRequest {
                block_height: height,
            })
            .await?
            .block_hash
            .ok_or_else(|| BlockchainError::NotFound(format!("Unknown block height {}", height)))
    }

    async fn fetch_block(&self, block_hash: Sha256Hash) -> BlockchainResult<Option<Block>> {
        let response = self.client.block(BlockRequest { block_hash }).await?;
        Ok(response.block)
    }
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader").finish_non_exhaustive()
    }
}
