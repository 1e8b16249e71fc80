//! Committed blocks.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::Serialize;

use crate::primitives::{PublicAddress, Receipt, Sha256Hash, SignedTx};

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct BlockHeader {
    pub hash: Sha256Hash,
    pub height: u64,
    pub prev_hash: Sha256Hash,
    /// Unix seconds.
    pub timestamp: u32,
    pub proposer: PublicAddress,
    pub base_fee_per_gas: u64,
    pub gas_used: u64,
}

/// A block with its transactions and their receipts.
///
/// `receipts[i]` belongs to `transactions[i]`.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<SignedTx>,
    pub receipts: Vec<Receipt>,
}

impl Block {
    pub fn hash(&self) -> Sha256Hash {
        self.header.hash
    }

    pub fn height(&self) -> u64 {
        self.header.height
    }

    pub fn transactions_with_receipts(&self) -> impl Iterator<Item = (&SignedTx, &Receipt)> {
        self.transactions.iter().zip(self.receipts.iter())
    }

    /// Position of a transaction within this block.
    pub fn position_of(&self, transaction_hash: &Sha256Hash) -> Option<usize> {
        self.transactions
            .iter()
            .position(|tx| tx.hash() == *transaction_hash)
    }
}
