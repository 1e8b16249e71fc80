//! Commands: the individual operations a transaction carries.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::Serialize;

use crate::primitives::PublicAddress;

/// Move tokens to another account.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct Transfer {
    pub recipient: PublicAddress,
    pub amount: u64,
}

/// Deploy a contract; its address is derived from the signer and nonce.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct Deploy {
    #[serde(serialize_with = "crate::primitives::serialize_base64url")]
    pub contract: Vec<u8>,
    pub cbi_version: u32,
}

/// Invoke a contract method, optionally attaching tokens.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct Call {
    pub target: PublicAddress,
    pub method: String,
    pub arguments: Option<Vec<Vec<u8>>>,
    pub amount: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct CreateDeposit {
    pub operator: PublicAddress,
    pub balance: u64,
    pub auto_stake_rewards: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct SetDepositSettings {
    pub operator: PublicAddress,
    pub auto_stake_rewards: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct TopUpDeposit {
    pub operator: PublicAddress,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct WithdrawDeposit {
    pub operator: PublicAddress,
    pub max_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct StakeDeposit {
    pub operator: PublicAddress,
    pub max_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct UnstakeDeposit {
    pub operator: PublicAddress,
    pub max_amount: u64,
}

/// A single operation inside a transaction.
///
/// Commands execute in order and `receipt.command_receipts[i]` reports on
/// `commands[i]`.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Transfer(Transfer),
    Deploy(Deploy),
    Call(Call),
    CreateDeposit(CreateDeposit),
    SetDepositSettings(SetDepositSettings),
    TopUpDeposit(TopUpDeposit),
    WithdrawDeposit(WithdrawDeposit),
    StakeDeposit(StakeDeposit),
    UnstakeDeposit(UnstakeDeposit),
}

/// Payload-free tag for a [`Command`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Transfer,
    Deploy,
    Call,
    CreateDeposit,
    SetDepositSettings,
    TopUpDeposit,
    WithdrawDeposit,
    StakeDeposit,
    UnstakeDeposit,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Transfer(_) => CommandKind::Transfer,
            Command::Deploy(_) => CommandKind::Deploy,
            Command::Call(_) => CommandKind::Call,
            Command::CreateDeposit(_) => CommandKind::CreateDeposit,
            Command::SetDepositSettings(_) => CommandKind::SetDepositSettings,
            Command::TopUpDeposit(_) => CommandKind::TopUpDeposit,
            Command::WithdrawDeposit(_) => CommandKind::WithdrawDeposit,
            Command::StakeDeposit(_) => CommandKind::StakeDeposit,
            Command::UnstakeDeposit(_) => CommandKind::UnstakeDeposit,
        }
    }

    /// Tokens this command moves out of the signer's balance, if known up front.
    pub fn attached_amount(&self) -> Option<u64> {
        match self {
            Command::Transfer(transfer) => Some(transfer.amount),
            Command::Call(call) => call.amount,
            Command::CreateDeposit(deposit) => Some(deposit.balance),
            Command::TopUpDeposit(top_up) => Some(top_up.amount),
            Command::Deploy(_)
            | Command::SetDepositSettings(_)
            | Command::WithdrawDeposit(_)
            | Command::StakeDeposit(_)
            | Command::UnstakeDeposit(_) => None,
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CommandKind::Transfer => "Transfer",
            CommandKind::Deploy => "Deploy",
            CommandKind::Call => "Call",
            CommandKind::CreateDeposit => "CreateDeposit",
            CommandKind::SetDepositSettings => "SetDepositSettings",
            CommandKind::TopUpDeposit => "TopUpDeposit",
            CommandKind::WithdrawDeposit => "WithdrawDeposit",
            CommandKind::StakeDeposit => "StakeDeposit",
            CommandKind::UnstakeDeposit => "UnstakeDeposit",
        };
        f.write_str(name)
    }
}

macro_rules! impl_from_payload {
    ($($payload:ident),* $(,)?) => {
        $(
            impl From<$payload> for Command {
                fn from(payload: $payload) -> Self {
                    Command::$payload(payload)
                }
            }
        )*
    };
}

impl_from_payload!(
    Transfer,
    Deploy,
    Call,
    CreateDeposit,
    SetDepositSettings,
    TopUpDeposit,
    WithdrawDeposit,
    StakeDeposit,
    UnstakeDeposit,
);
