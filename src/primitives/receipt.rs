//! Execution receipts.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::Serialize;

/// Outcome of executing one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub enum ExitStatus {
    Success,
    Failed,
}

/// Topic/value pair emitted by a contract.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct Log {
    #[serde(serialize_with = "crate::primitives::serialize_base64url")]
    pub topic: Vec<u8>,
    #[serde(serialize_with = "crate::primitives::serialize_base64url")]
    pub value: Vec<u8>,
}

/// Per-command receipt.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct CommandReceipt {
    pub exit_status: ExitStatus,
    pub gas_used: u64,
    #[serde(serialize_with = "crate::primitives::serialize_base64url")]
    pub return_values: Vec<u8>,
    pub logs: Vec<Log>,
}

impl CommandReceipt {
    pub fn is_success(&self) -> bool {
        self.exit_status == ExitStatus::Success
    }
}

/// Transaction receipt. Its existence means the transaction was committed.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct Receipt {
    pub command_receipts: Vec<CommandReceipt>,
}

impl Receipt {
    /// Total gas consumed across all commands.
    pub fn gas_used(&self) -> u64 {
        self.command_receipts
            .iter()
            .fold(0u64, |total, receipt| total.saturating_add(receipt.gas_used))
    }

    /// True when every command exited with `Success`.
    pub fn all_succeeded(&self) -> bool {
        self.command_receipts.iter().all(CommandReceipt::is_success)
    }
}
