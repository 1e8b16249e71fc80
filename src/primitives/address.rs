//! 32-byte identifiers: account addresses and SHA-256 hashes.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use borsh::{BorshDeserialize, BorshSerialize};

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Encode bytes as unpadded base64url.
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode base64url, tolerating trailing `=` padding.
pub fn decode_base64url(input: &str) -> BlockchainResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(input.trim_end_matches('='))
        .map_err(|e| BlockchainError::Validation(format!("Invalid base64url string '{}': {}", input, e)))
}

macro_rules! bytes32_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, BorshSerialize, BorshDeserialize,
        )]
        pub struct $name([u8; 32]);

        impl $name {
            /// Length in bytes.
            pub const LENGTH: usize = 32;

            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn to_base64url(&self) -> String {
                encode_base64url(&self.0)
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; 32] {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = BlockchainError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                let array: [u8; 32] = bytes.try_into().map_err(|_| {
                    BlockchainError::Validation(format!(
                        "{} must be exactly 32 bytes, got {}",
                        $label,
                        bytes.len()
                    ))
                })?;
                Ok(Self(array))
            }
        }

        impl FromStr for $name {
            type Err = BlockchainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = decode_base64url(s)?;
                Self::try_from(bytes.as_slice())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_base64url())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(self.0))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                crate::primitives::serialize_base64url(&self.0, serializer)
            }
        }
    };
}

bytes32_type!(
    /// Ed25519 public key doubling as an account address.
    PublicAddress,
    "PublicAddress"
);

bytes32_type!(
    /// SHA-256 digest identifying a transaction or block.
    Sha256Hash,
    "Sha256Hash"
);

impl Sha256Hash {
    /// Hash arbitrary bytes.
    pub fn digest(data: &[u8]) -> Self {
        use sha2::{Digest, Sha256};
        Self(Sha256::digest(data).into())
    }
}

/// Anything that can name an account: a typed address or its base64url form.
pub trait ToAddress {
    fn to_address(&self) -> BlockchainResult<PublicAddress>;
}

impl ToAddress for PublicAddress {
    fn to_address(&self) -> BlockchainResult<PublicAddress> {
        Ok(*self)
    }
}

impl ToAddress for str {
    fn to_address(&self) -> BlockchainResult<PublicAddress> {
        self.parse()
    }
}

impl ToAddress for String {
    fn to_address(&self) -> BlockchainResult<PublicAddress> {
        self.parse()
    }
}

impl<T: ToAddress + ?Sized> ToAddress for &T {
    fn to_address(&self) -> BlockchainResult<PublicAddress> {
        (**self).to_address()
    }
}

/// Anything that can name a transaction or block by hash.
pub trait ToHash {
    fn to_hash(&self) -> BlockchainResult<Sha256Hash>;
}

impl ToHash for Sha256Hash {
    fn to_hash(&self) -> BlockchainResult<Sha256Hash> {
        Ok(*self)
    }
}

impl ToHash for str {
    fn to_hash(&self) -> BlockchainResult<Sha256Hash> {
        self.parse()
    }
}

impl ToHash for String {
    fn to_hash(&self) -> BlockchainResult<Sha256Hash> {
        self.parse()
    }
}

impl<T: ToHash + ?Sized> ToHash for &T {
    fn to_hash(&self) -> BlockchainResult<Sha256Hash> {
        (**self).to_hash()
    }
}
