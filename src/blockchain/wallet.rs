//! Key material and transaction signing.
//!
//! # Security
//! - Private keys are never logged or serialized
//! - Environment loading is a convenience for binaries; the builder, reader
//!   and writer only ever receive a `Keypair` value

use ed25519_dalek::{Signer, SigningKey};

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::primitives::address::decode_base64url;
use crate::primitives::{PublicAddress, SignedTx, Transaction};

/// Environment variable holding the base64url public key.
pub const PUBLIC_KEY_ENV_VAR: &str = "PCHAIN_PUBLIC_KEY";

/// Environment variable holding the base64url private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PCHAIN_PRIVATE_KEY";

/// Ed25519 keypair used to sign transactions.
///
/// The public half is stored as given rather than re-derived, so a pair whose
/// halves do not belong together can be constructed. Signatures made with such
/// a pair fail verification, which the transaction builder checks for.
#[derive(Clone)]
pub struct Keypair {
    public_key: PublicAddress,
    signing_key: SigningKey,
}

impl Keypair {
    /// Pair a public address with a private key without checking that they match.
    pub fn new(public_key: PublicAddress, private_key: [u8; 32]) -> Self {
        Self {
            public_key,
            signing_key: SigningKey::from_bytes(&private_key),
        }
    }

    /// Derive the public half from a private key.
    pub fn from_private_key(private_key: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&private_key);
        Self {
            public_key: PublicAddress::new(signing_key.verifying_key().to_bytes()),
            signing_key,
        }
    }

    /// Parse base64url-encoded public and private keys.
    pub fn from_base64url(public_key: &str, private_key: &str) -> BlockchainResult<Self> {
        let public_key: PublicAddress = public_key
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid public key: {}", e)))?;

        let private_bytes = decode_base64url(private_key)
            .map_err(|_| BlockchainError::Wallet("Invalid private key encoding".to_string()))?;
        let private_key: [u8; 32] = private_bytes.as_slice().try_into().map_err(|_| {
            BlockchainError::Wallet(format!(
                "Invalid private key length: expected 32 bytes, got {}",
                private_bytes.len()
            ))
        })?;

        tracing::debug!(public_key = %public_key, "Keypair loaded");

        Ok(Self::new(public_key, private_key))
    }

    /// Load a keypair from `PCHAIN_PUBLIC_KEY` and `PCHAIN_PRIVATE_KEY`.
    pub fn from_env() -> BlockchainResult<Self> {
        let public_key = read_env(PUBLIC_KEY_ENV_VAR)?;
        let private_key = read_env(PRIVATE_KEY_ENV_VAR)?;
        Self::from_base64url(&public_key, &private_key)
    }

    /// Fresh random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::rngs::OsRng);
        Self {
            public_key: PublicAddress::new(signing_key.verifying_key().to_bytes()),
            signing_key,
        }
    }

    pub fn public_key(&self) -> PublicAddress {
        self.public_key
    }

    /// Sign the transaction's wire encoding.
    pub fn sign_transaction(&self, transaction: Transaction) -> BlockchainResult<SignedTx> {
        let message = transaction.signing_bytes()?;
        let signature = self.signing_key.sign(&message);
        SignedTx::from_parts(transaction, signature.to_bytes())
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

fn read_env(name: &str) -> BlockchainResult<String> {
    std::env::var(name)
        .map_err(|_| BlockchainError::Wallet(format!("Environment variable {} not set", name)))
}
