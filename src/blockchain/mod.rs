//! Transaction lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! Reader.get_account_nonce (current nonce)
//!     → transaction.rs (commands + fees → signed, self-verified SignedTx)
//!     → writer.rs submit (retry while mempool full)
//!     → writer.rs confirm (poll receipt until committed)
//!     → Receipt / CommandReceipt back to the caller
//!
//! reader.rs: accounts, blocks, transactions → Option / zero for "absent"
//! contract.rs: deployer + nonce → contract address, call argument encoding
//! ```
//!
//! # Security Constraints
//! - Private keys never leave `Keypair` and are never logged
//! - The core receives endpoints and keypairs as values; it reads no
//!   files or environment variables itself

pub mod contract;
pub mod reader;
pub mod transaction;
pub mod types;
pub mod wallet;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use contract::{decode_return_value, derive_contract_address, CallArguments};
pub use reader::{BlockId, Reader, TransactionResult};
pub use transaction::TransactionBuilder;
pub use types::{BlockchainError, BlockchainResult};
pub use wallet::Keypair;
pub use writer::{Writer, CONFIRM_POLL_POLICY, SUBMIT_RETRY_POLICY};
