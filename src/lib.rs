//! Client SDK for a proof-of-stake chain: build and sign transactions,
//! submit and confirm them, and query accounts, blocks and transactions.

pub mod blockchain;
pub mod config;
pub mod observability;
pub mod pchain;
pub mod primitives;
pub mod resilience;
pub mod rpc;

pub use blockchain::{
    BlockchainError, BlockchainResult, Keypair, Reader, TransactionBuilder, Writer,
};
pub use config::SdkConfig;
pub use pchain::PChain;
