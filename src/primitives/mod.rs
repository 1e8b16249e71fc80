//! Typed domain values exchanged with the network.
//!
//! # Data Flow
//! ```text
//! caller input (base64url strings, typed values)
//!     → address.rs (PublicAddress, Sha256Hash, ToAddress / ToHash)
//!     → command.rs (one Command per on-chain operation)
//!     → transaction.rs (Transaction → SignedTx, content hash)
//!     → receipt.rs / block.rs / account.rs (read-side projections)
//! ```
//!
//! # Encoding
//! - Binary encoding is borsh for every value that crosses the wire
//! - Human-facing encoding of 32-byte values is unpadded base64url

pub mod account;
pub mod address;
pub mod block;
pub mod command;
pub mod receipt;
pub mod transaction;

pub use account::Account;
pub use address::{PublicAddress, Sha256Hash, ToAddress, ToHash};
pub use block::{Block, BlockHeader};
pub use command::{
    Call, Command, CommandKind, CreateDeposit, Deploy, SetDepositSettings, StakeDeposit,
    TopUpDeposit, Transfer, UnstakeDeposit, WithdrawDeposit,
};
pub use receipt::{CommandReceipt, ExitStatus, Log, Receipt};
pub use transaction::{SignedTx, Transaction};

/// Lowest `max_base_fee_per_gas` the network accepts.
pub const MIN_BASE_FEE_PER_GAS: u64 = 8;

/// Highest `gas_limit` a single transaction may declare.
pub const MAX_GAS_LIMIT: u64 = 250_000_000;

/// Gas limit sufficient for a basic transfer.
pub const DEFAULT_GAS_LIMIT: u64 = 300_000;

/// Serialize any byte container as unpadded base64url.
pub(crate) fn serialize_base64url<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: AsRef<[u8]>,
{
    serializer.serialize_str(&address::encode_base64url(bytes.as_ref()))
}
