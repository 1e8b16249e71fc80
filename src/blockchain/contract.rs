//! Contract helpers: address derivation and call argument encoding.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::primitives::{CommandReceipt, PublicAddress, Sha256Hash};

/// Address a contract deployed by `deployer` at `nonce` will live at.
///
/// The address is `SHA-256(deployer || nonce)` with the nonce encoded as a
/// little-endian `u64`. Any integer type is accepted; values that do not fit
/// in a `u64`, negative ones included, fail with `Validation`.
pub fn derive_contract_address<N>(
    deployer: &PublicAddress,
    nonce: N,
) -> BlockchainResult<PublicAddress>
where
    N: TryInto<u64>,
{
    let nonce: u64 = nonce.try_into().map_err(|_| {
        BlockchainError::Validation(
            "Deploy nonce must be a non-negative integer no larger than u64::MAX".to_string(),
        )
    })?;

    let mut preimage = Vec::with_capacity(PublicAddress::LENGTH + 8);
    preimage.extend_from_slice(deployer.as_bytes());
    preimage.extend_from_slice(&nonce.to_le_bytes());

    Ok(PublicAddress::new(*Sha256Hash::digest(&preimage).as_bytes()))
}

/// Borsh-encoded arguments for a contract call or view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArguments {
    arguments: Vec<Vec<u8>>,
}

impl CallArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `value` and append it as the next argument.
    pub fn push<T: BorshSerialize + ?Sized>(&mut self, value: &T) -> BlockchainResult<&mut Self> {
        let encoded = borsh::to_vec(value)
            .map_err(|e| BlockchainError::Validation(format!("Cannot encode argument: {}", e)))?;
        self.arguments.push(encoded);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// The encoded list, or `None` when no argument was pushed.
    pub fn into_inner(self) -> Option<Vec<Vec<u8>>> {
        if self.arguments.is_empty() {
            None
        } else {
            Some(self.arguments)
        }
    }
}

/// Decode a command's borsh-encoded return value.
pub fn decode_return_value<T: BorshDeserialize>(receipt: &CommandReceipt) -> BlockchainResult<T> {
    borsh::from_slice(&receipt.return_values)
        .map_err(|e| BlockchainError::Validation(format!("Malformed return value: {}", e)))
}
