//! Request and response messages, one pair per RPC route.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::primitives::{Account, Block, CommandReceipt, PublicAddress, Receipt, Sha256Hash, SignedTx};

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StateRequest {
    pub accounts: Vec<PublicAddress>,
    pub include_contract: bool,
    pub storage_keys: Vec<(PublicAddress, Vec<Vec<u8>>)>,
}

/// State query result.
///
/// `accounts` is `None` only when the node omitted the collection entirely.
/// An entry whose account is `None` is one the node could not express in
/// either account shape.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StateResponse {
    pub accounts: Option<Vec<(PublicAddress, Option<Account>)>>,
    pub storage_tuples: Vec<(PublicAddress, Vec<(Vec<u8>, Vec<u8>)>)>,
    pub block_hash: Sha256Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BlockRequest {
    pub block_hash: Sha256Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BlockResponse {
    pub block: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BlockHashByHeightRequest {
    pub block_height: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BlockHashByHeightResponse {
    pub block_height: u64,
    pub block_hash: Option<Sha256Hash>,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct HighestCommittedBlockResponse {
    pub block_hash: Option<Sha256Hash>,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TransactionRequest {
    pub transaction_hash: Sha256Hash,
    pub include_receipt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TransactionResponse {
    pub transaction: Option<SignedTx>,
    pub receipt: Option<Receipt>,
    pub block_hash: Option<Sha256Hash>,
    pub position: Option<u32>,
}

/// Receipt lookup by transaction hash.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TransactionPositionRequest {
    pub transaction_hash: Sha256Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ReceiptResponse {
    pub transaction_hash: Sha256Hash,
    pub receipt: Option<Receipt>,
    pub block_hash: Option<Sha256Hash>,
    pub position: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SubmitTransactionRequest {
    pub transaction: SignedTx,
}

/// Reasons the mempool refuses a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum SubmitTransactionError {
    UnacceptableNonce,
    MempoolFull,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SubmitTransactionResponse {
    pub error: Option<SubmitTransactionError>,
}

/// Simulated contract call; nothing is signed or committed.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ViewRequest {
    pub target: PublicAddress,
    pub method: Vec<u8>,
    pub arguments: Option<Vec<Vec<u8>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ViewResponse {
    pub receipt: CommandReceipt,
}
