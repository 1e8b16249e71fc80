//! Account state projections.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::Serialize;

/// Account state as returned by a state query.
///
/// Contract bytecode is only present when it was requested and the account
/// holds a contract.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Account {
    WithContract {
        nonce: u64,
        balance: u64,
        #[serde(serialize_with = "serialize_optional_code")]
        contract: Option<Vec<u8>>,
        cbi_version: Option<u32>,
    },
    WithoutContract {
        nonce: u64,
        balance: u64,
    },
}

impl Account {
    pub fn nonce(&self) -> u64 {
        match self {
            Account::WithContract { nonce, .. } | Account::WithoutContract { nonce, .. } => *nonce,
        }
    }

    pub fn balance(&self) -> u64 {
        match self {
            Account::WithContract { balance, .. } | Account::WithoutContract { balance, .. } => {
                *balance
            }
        }
    }

    /// Deployed bytecode, if this shape carries any.
    pub fn contract(&self) -> Option<&[u8]> {
        match self {
            Account::WithContract { contract, .. } => contract.as_deref(),
            Account::WithoutContract { .. } => None,
        }
    }
}

fn serialize_optional_code<S: serde::Serializer>(
    code: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match code {
        Some(bytes) => crate::primitives::serialize_base64url(bytes, serializer),
        None => serializer.serialize_none(),
    }
}
