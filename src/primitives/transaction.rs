//! Unsigned and signed transactions.

use borsh::{BorshDeserialize, BorshSerialize};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::Serialize;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::primitives::{Command, CommandReceipt, PublicAddress, Receipt, Sha256Hash};

/// Ordered commands plus the fee parameters the signer commits to.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct Transaction {
    pub signer: PublicAddress,
    pub nonce: u64,
    pub commands: Vec<Command>,
    pub gas_limit: u64,
    pub max_base_fee_per_gas: u64,
    pub priority_fee_per_gas: u64,
}

impl Transaction {
    /// Bytes covered by the signature.
    pub fn signing_bytes(&self) -> BlockchainResult<Vec<u8>> {
        borsh::to_vec(self)
            .map_err(|e| BlockchainError::Validation(format!("Transaction cannot be encoded: {}", e)))
    }
}

/// A transaction with its Ed25519 signature and content hash.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct SignedTx {
    transaction: Transaction,
    #[serde(serialize_with = "crate::primitives::serialize_base64url")]
    signature: [u8; 64],
    hash: Sha256Hash,
}

impl SignedTx {
    /// Attach a signature and derive the content hash.
    pub fn from_parts(transaction: Transaction, signature: [u8; 64]) -> BlockchainResult<Self> {
        let hash = content_hash(&transaction.signing_bytes()?, &signature);
        Ok(Self {
            transaction,
            signature,
            hash,
        })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn signature(&self) -> &[u8; 64] {
        &self.signature
    }

    /// Content hash; the network identifies the transaction by it.
    pub fn hash(&self) -> Sha256Hash {
        self.hash
    }

    /// Wire encoding submitted to the network.
    pub fn serialize(&self) -> BlockchainResult<Vec<u8>> {
        borsh::to_vec(self)
            .map_err(|e| BlockchainError::Validation(format!("Signed transaction cannot be encoded: {}", e)))
    }

    /// Check the signature against `public_key` and that the stored hash
    /// matches the signed content.
    pub fn verify_signature(&self, public_key: &PublicAddress) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(public_key.as_bytes()) else {
            return false;
        };
        let Ok(message) = self.transaction.signing_bytes() else {
            return false;
        };
        let signature = Signature::from_bytes(&self.signature);

        verifying_key.verify(&message, &signature).is_ok()
            && content_hash(&message, &self.signature) == self.hash
    }

    /// Pair each command with the receipt entry reporting on it.
    pub fn command_outcomes<'a>(
        &'a self,
        receipt: &'a Receipt,
    ) -> impl Iterator<Item = (&'a Command, &'a CommandReceipt)> + 'a {
        self.transaction
            .commands
            .iter()
            .zip(receipt.command_receipts.iter())
    }
}

fn content_hash(message: &[u8], signature: &[u8; 64]) -> Sha256Hash {
    let mut preimage = Vec::with_capacity(message.len() + signature.len());
    preimage.extend_from_slice(message);
    preimage.extend_from_slice(signature);
    Sha256Hash::digest(&preimage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{ExitStatus, Transfer};

    fn unsigned() -> Transaction {
        Transaction {
            signer: PublicAddress::new([7; 32]),
            nonce: 3,
            commands: vec![Transfer {
                recipient: PublicAddress::new([9; 32]),
                amount: 42,
            }
            .into()],
            gas_limit: 300_000,
            max_base_fee_per_gas: 8,
            priority_fee_per_gas: 0,
        }
    }

    #[test]
    fn test_hash_depends_on_signature() {
        let a = SignedTx::from_parts(unsigned(), [1; 64]).unwrap();
        let b = SignedTx::from_parts(unsigned(), [2; 64]).unwrap();
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_garbage_signature_does_not_verify() {
        let tx = SignedTx::from_parts(unsigned(), [1; 64]).unwrap();
        assert!(!tx.verify_signature(&PublicAddress::new([7; 32])));
    }

    #[test]
    fn test_signed_tx_wire_roundtrip() {
        let tx = SignedTx::from_parts(unsigned(), [5; 64]).unwrap();
        let bytes = tx.serialize().unwrap();
        let decoded: SignedTx = borsh::from_slice(&bytes).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn test_command_outcomes_follow_command_order() {
        let mut transaction = unsigned();
        transaction.commands.push(
            Transfer {
                recipient: PublicAddress::new([10; 32]),
                amount: 1,
            }
            .into(),
        );
        let tx = SignedTx::from_parts(transaction, [0; 64]).unwrap();
        let receipt = Receipt {
            command_receipts: vec![
                CommandReceipt {
                    exit_status: ExitStatus::Success,
                    gas_used: 10,
                    return_values: Vec::new(),
                    logs: Vec::new(),
                },
                CommandReceipt {
                    exit_status: ExitStatus::Failed,
                    gas_used: 20,
                    return_values: Vec::new(),
                    logs: Vec::new(),
                },
            ],
        };

        let outcomes: Vec<_> = tx.command_outcomes(&receipt).collect();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].0.attached_amount(), Some(42));
        assert_eq!(outcomes[1].1.exit_status, ExitStatus::Failed);
    }
}
