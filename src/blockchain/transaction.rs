//! Transaction assembly and signing.
//!
//! # Responsibilities
//! - Accumulate commands in execution order
//! - Enforce gas limit and base fee bounds as they are set
//! - Sign, then verify the signature before handing the transaction out

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Keypair;
use crate::primitives::{
    Command, SignedTx, Transaction, DEFAULT_GAS_LIMIT, MAX_GAS_LIMIT, MIN_BASE_FEE_PER_GAS,
};

/// Fee-bounded transaction under construction.
///
/// ```ignore
/// let signed = TransactionBuilder::new(keypair, nonce)
///     .add_command(Transfer { recipient, amount: 99 })
///     .set_gas_limit(500_000)?
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    keypair: Keypair,
    nonce: u64,
    commands: Vec<Command>,
    gas_limit: u64,
    max_base_fee_per_gas: u64,
    priority_fee_per_gas: u64,
}

impl TransactionBuilder {
    pub fn new(keypair: Keypair, nonce: u64) -> Self {
        Self {
            keypair,
            nonce,
            commands: Vec::new(),
            gas_limit: DEFAULT_GAS_LIMIT,
            max_base_fee_per_gas: MIN_BASE_FEE_PER_GAS,
            priority_fee_per_gas: 0,
        }
    }

    /// Append a command; commands execute in the order they are added.
    pub fn add_command(&mut self, command: impl Into<Command>) -> &mut Self {
        self.commands.push(command.into());
        self
    }

    /// Fails with `Validation` above [`MAX_GAS_LIMIT`], leaving the current value.
    pub fn set_gas_limit(&mut self, gas_limit: u64) -> BlockchainResult<&mut Self> {
        if gas_limit > MAX_GAS_LIMIT {
            return Err(BlockchainError::Validation(format!(
                "Gas limit {} exceeds maximum of {}",
                gas_limit, MAX_GAS_LIMIT
            )));
        }
        self.gas_limit = gas_limit;
        Ok(self)
    }

    /// Fails with `Validation` below [`MIN_BASE_FEE_PER_GAS`], leaving the current value.
    pub fn set_max_base_fee_per_gas(&mut self, max_base_fee: u64) -> BlockchainResult<&mut Self> {
        if max_base_fee < MIN_BASE_FEE_PER_GAS {
            return Err(BlockchainError::Validation(format!(
                "Max base fee per gas {} is below minimum of {}",
                max_base_fee, MIN_BASE_FEE_PER_GAS
            )));
        }
        self.max_base_fee_per_gas = max_base_fee;
        Ok(self)
    }

    pub fn set_priority_fee_per_gas(&mut self, priority_fee: u64) -> &mut Self {
        self.priority_fee_per_gas = priority_fee;
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn max_base_fee_per_gas(&self) -> u64 {
        self.max_base_fee_per_gas
    }

    pub fn priority_fee_per_gas(&self) -> u64 {
        self.priority_fee_per_gas
    }

    /// Sign the accumulated transaction.
    ///
    /// # Errors
    /// - `Validation` if no command was added; nothing is signed
    /// - `Integrity` if the signature does not verify under the keypair's
    ///   public key
    pub fn build(&self) -> BlockchainResult<SignedTx> {
        if self.commands.is_empty() {
            return Err(BlockchainError::Validation(
                "Transaction must contain at least one command".to_string(),
            ));
        }

        let signer = self.keypair.public_key();
        let transaction = Transaction {
            signer,
            nonce: self.nonce,
            commands: self.commands.clone(),
            gas_limit: self.gas_limit,
            max_base_fee_per_gas: self.max_base_fee_per_gas,
            priority_fee_per_gas: self.priority_fee_per_gas,
        };

        let signed = self.keypair.sign_transaction(transaction)?;
        if !signed.verify_signature(&signer) {
            return Err(BlockchainError::Integrity(format!(
                "Signature does not verify for signer {}",
                signer
            )));
        }

        tracing::debug!(
            tx_hash = %signed.hash(),
            nonce = self.nonce,
            commands = self.commands.len(),
            "Transaction built"
        );

        Ok(signed)
    }
}
