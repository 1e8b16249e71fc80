//! Write path: submission, confirmation and convenience operations.
//!
//! # Responsibilities
//! - Submit signed transactions, resubmitting while the mempool is full
//! - Poll for a receipt until the transaction is in a committed block
//! - Build, submit and confirm single-command transactions for callers
//!
//! Convenience operations read the signer's nonce right before building.
//! Concurrent calls for one signer are not serialized; a race surfaces as a
//! `Nonce` error from the network.

use std::sync::Arc;
use std::time::Duration;

use crate::blockchain::reader::Reader;
use crate::blockchain::transaction::TransactionBuilder;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Keypair;
use crate::config::SdkConfig;
use crate::observability::metrics;
use crate::primitives::{
    Call, CommandReceipt, ExitStatus, Receipt, Sha256Hash, SignedTx, ToAddress, Transfer,
};
use crate::resilience::{Attempt, PollPolicy, RetryPolicy};
use crate::rpc::messages::*;
use crate::rpc::{HttpRpcClient, RpcClient};

/// Default submission policy: 10 attempts, 500 ms growing by 1.8x.
pub const SUBMIT_RETRY_POLICY: RetryPolicy = RetryPolicy {
    max_attempts: 10,
    initial_interval: Duration::from_millis(500),
    multiplier: 1.8,
};

/// Default confirmation policy: 30 receipt lookups, 6 s apart.
pub const CONFIRM_POLL_POLICY: PollPolicy = PollPolicy {
    max_attempts: 30,
    interval: Duration::from_millis(6_000),
};

/// Submits transactions and waits for them to commit.
#[derive(Clone)]
pub struct Writer {
    client: Arc<dyn RpcClient>,
    reader: Reader,
    submission: RetryPolicy,
    confirmation: PollPolicy,
}

impl Writer {
    /// Create a writer talking HTTP to `endpoint` with the default policies.
    pub fn new(endpoint: &str) -> BlockchainResult<Self> {
        Ok(Self::with_client(Arc::new(HttpRpcClient::new(endpoint)?)))
    }

    pub fn with_client(client: Arc<dyn RpcClient>) -> Self {
        Self {
            reader: Reader::with_client(client.clone()),
            client,
            submission: SUBMIT_RETRY_POLICY,
            confirmation: CONFIRM_POLL_POLICY,
        }
    }

    /// Endpoint, request timeout and both policies from `config`.
    pub fn with_config(config: &SdkConfig) -> BlockchainResult<Self> {
        let client = HttpRpcClient::with_timeout(&config.rpc.url, config.rpc.timeout())?;
        Ok(Self::with_client(Arc::new(client))
            .with_policies(config.submission.policy(), config.confirmation.policy()))
    }

    pub fn with_policies(mut self, submission: RetryPolicy, confirmation: PollPolicy) -> Self {
        self.submission = submission;
        self.confirmation = confirmation;
        self
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    /// Submit `transaction` and return its hash once the mempool accepts it.
    ///
    /// # Errors
    /// - `Nonce` if the network rejects the nonce; rebuild with a fresh one
    /// - `Validation` for any other rejection
    /// - `Timeout` if the mempool stays full for every attempt
    pub async fn submit_transaction(&self, transaction: &SignedTx) -> BlockchainResult<Sha256Hash> {
        let tx_hash = transaction.hash();
        let mut attempt = 0u32;

        self.submission
            .run(|| {
                attempt += 1;
                let attempt = attempt;
                let request = SubmitTransactionRequest {
                    transaction: transaction.clone(),
                };
                async move {
                    let response = self.client.submit_transaction(request).await?;
                    match response.error {
                        None => {
                            tracing::info!(tx_hash = %tx_hash, attempt, "Transaction submitted");
                            Ok(Attempt::Ready(tx_hash))
                        }
                        Some(SubmitTransactionError::MempoolFull) => {
                            tracing::warn!(tx_hash = %tx_hash, attempt, "Mempool full, will resubmit");
                            metrics::record_submission_retry();
                            Ok(Attempt::Retry)
                        }
                        Some(SubmitTransactionError::UnacceptableNonce) => {
                            Err(BlockchainError::Nonce(format!(
                                "Nonce {} was not accepted for transaction {}",
                                transaction.transaction().nonce,
                                tx_hash
                            )))
                        }
                        Some(SubmitTransactionError::Other) => Err(BlockchainError::Validation(
                            format!("Transaction {} was rejected by the network", tx_hash),
                        )),
                    }
                }
            })
            .await
    }

    /// Submit `transaction` and wait for its receipt.
    ///
    /// A `Timeout` means the transaction was still pending when polling
    /// stopped; it may yet commit.
    pub async fn submit_and_confirm_transaction(
        &self,
        transaction: &SignedTx,
    ) -> BlockchainResult<Receipt> {
        let transaction_hash = self.submit_transaction(transaction).await?;
        let mut attempt = 0u32;

        let outcome = self
            .confirmation
            .run(
                || {
                    attempt += 1;
                    let attempt = attempt;
                    async move {
                        let response = self
                            .client
                            .receipt(TransactionPositionRequest { transaction_hash })
                            .await?;
                        if response.block_hash.is_none() {
                            tracing::debug!(tx_hash = %transaction_hash, attempt, "Transaction pending");
                        }
                        Ok(response)
                    }
                },
                |response: &ReceiptResponse| {
                    response.block_hash.is_some() && response.receipt.is_some()
                },
            )
            .await;
        metrics::record_poll_attempts(attempt);
        let response = outcome?;

        match response {
            ReceiptResponse {
                receipt: Some(receipt),
                block_hash: Some(block_hash),
                ..
            } => {
                tracing::info!(
                    tx_hash = %transaction_hash,
                    block_hash = %block_hash,
                    gas_used = receipt.gas_used(),
                    "Transaction confirmed"
                );
                Ok(receipt)
            }
            _ => Err(BlockchainError::Integrity(format!(
                "Confirmed receipt for {} is incomplete",
                transaction_hash
            ))),
        }
    }

    /// Simulate a contract call. Nothing is signed and no state changes.
    pub async fn call_contract_view(
        &self,
        target: impl ToAddress,
        method: &str,
        arguments: Option<Vec<Vec<u8>>>,
    ) -> BlockchainResult<CommandReceipt> {
        let target = target.to_address()?;
        let response = self
            .client
            .view(ViewRequest {
                target,
                method: method.as_bytes().to_vec(),
                arguments,
            })
            .await?;
        Ok(response.receipt)
    }

    /// Call a contract method in a single-command transaction and wait for it.
    pub async fn call_contract_state_change(
        &self,
        target: impl ToAddress,
        method: &str,
        arguments: Option<Vec<Vec<u8>>>,
        amount: Option<u64>,
        keypair: &Keypair,
        gas_limit: u64,
    ) -> BlockchainResult<CommandReceipt> {
        let target = target.to_address()?;
        let nonce = self.reader.get_account_nonce(keypair.public_key()).await?;

        let mut builder = TransactionBuilder::new(keypair.clone(), nonce);
        builder
            .add_command(Call {
                target,
                method: method.to_string(),
                arguments,
                amount,
            })
            .set_gas_limit(gas_limit)?;
        let transaction = builder.build()?;

        let receipt = self.submit_and_confirm_transaction(&transaction).await?;
        receipt.command_receipts.into_iter().next().ok_or_else(|| {
            BlockchainError::Integrity(format!(
                "Receipt for {} has no command receipts",
                transaction.hash()
            ))
        })
    }

    /// Transfer tokens and return the transaction hash once it succeeded.
    ///
    /// # Errors
    /// `ExecutionFailed` if the transfer committed with a non-success status.
    pub async fn transfer_token(
        &self,
        recipient: impl ToAddress,
        amount: u64,
        keypair: &Keypair,
    ) -> BlockchainResult<Sha256Hash> {
        let recipient = recipient.to_address()?;
        let nonce = self.reader.get_account_nonce(keypair.public_key()).await?;

        let mut builder = TransactionBuilder::new(keypair.clone(), nonce);
        builder.add_command(Transfer { recipient, amount });
        let transaction = builder.build()?;

        let receipt = self.submit_and_confirm_transaction(&transaction).await?;
        let succeeded = receipt
            .command_receipts
            .first()
            .is_some_and(|command| command.exit_status == ExitStatus::Success);

        if succeeded {
            Ok(transaction.hash())
        } else {
            Err(BlockchainError::ExecutionFailed(format!(
                "Transfer of {} to {} failed",
                amount, recipient
            )))
        }
    }
}

impl std::fmt::Debug for Writer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writer")
            .field("submission", &self.submission)
            .field("confirmation", &self.confirmation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::testing::*;
    use crate::primitives::{Account, PublicAddress};
    use tokio::time::Instant;

    fn writer() -> (Arc<MockRpcClient>, Writer) {
        let mock = Arc::new(MockRpcClient::default());
        (mock.clone(), Writer::with_client(mock))
    }

    fn keypair() -> Keypair {
        Keypair::from_private_key([11; 32])
    }

    fn signed_transfer(nonce: u64) -> SignedTx {
        let mut builder = TransactionBuilder::new(keypair(), nonce);
        builder.add_command(Transfer {
            recipient: PublicAddress::new([2; 32]),
            amount: 99,
        });
        builder.build().unwrap()
    }

    fn accepted() -> SubmitTransactionResponse {
        SubmitTransactionResponse { error: None }
    }

    fn rejected(error: SubmitTransactionError) -> SubmitTransactionResponse {
        SubmitTransactionResponse { error: Some(error) }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mempool_full_is_retried() {
        let (mock, writer) = writer();
        mock.submit_transaction
            .respond(rejected(SubmitTransactionError::MempoolFull))
            .respond(rejected(SubmitTransactionError::MempoolFull))
            .respond(accepted());

        let tx = signed_transfer(10_000);
        let start = Instant::now();
        let hash = writer.submit_transaction(&tx).await.unwrap();

        assert_eq!(hash, tx.hash());
        assert_eq!(mock.submit_transaction.calls(), 3);
        assert_eq!(mock.submit_transaction.requests()[2].transaction, tx);
        // 500 ms, then 900 ms.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1_400));
        assert!(elapsed < Duration::from_millis(1_405));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unacceptable_nonce_is_not_retried() {
        let (mock, writer) = writer();
        mock.submit_transaction
            .respond(rejected(SubmitTransactionError::UnacceptableNonce));

        let result = writer.submit_transaction(&signed_transfer(1)).await;
        assert!(matches!(result, Err(BlockchainError::Nonce(_))));
        assert_eq!(mock.submit_transaction.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_rejection_is_validation_error() {
        let (mock, writer) = writer();
        mock.submit_transaction.respond(rejected(SubmitTransactionError::Other));

        let result = writer.submit_transaction(&signed_transfer(1)).await;
        assert!(matches!(result, Err(BlockchainError::Validation(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistently_full_mempool_times_out() {
        let (mock, writer) = writer();
        let writer = writer.with_policies(
            RetryPolicy {
                max_attempts: 3,
                initial_interval: Duration::from_millis(10),
                multiplier: 2.0,
            },
            CONFIRM_POLL_POLICY,
        );
        for _ in 0..3 {
            mock.submit_transaction
                .respond(rejected(SubmitTransactionError::MempoolFull));
        }

        let result = writer.submit_transaction(&signed_transfer(1)).await;
        assert!(matches!(result, Err(BlockchainError::Timeout(_))));
        assert_eq!(mock.submit_transaction.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmation_polls_until_committed() {
        let (mock, writer) = writer();
        let tx = signed_transfer(3);
        mock.submit_transaction.respond(accepted());
        mock.receipt
            .respond(pending_receipt(tx.hash()))
            .respond(pending_receipt(tx.hash()))
            .respond(committed_receipt(tx.hash(), receipt(ExitStatus::Success)));

        let start = Instant::now();
        let confirmed = writer.submit_and_confirm_transaction(&tx).await.unwrap();

        assert!(confirmed.all_succeeded());
        assert_eq!(mock.receipt.calls(), 3);
        assert_eq!(mock.receipt.requests()[0].transaction_hash, tx.hash());
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(12_000));
        assert!(elapsed < Duration::from_millis(12_005));
    }

    #[tokio::test(start_paused = true)]
    async fn test_receipt_without_block_hash_keeps_polling() {
        let (mock, writer) = writer();
        let tx = signed_transfer(3);
        let mut half_done = committed_receipt(tx.hash(), receipt(ExitStatus::Success));
        half_done.block_hash = None;

        mock.submit_transaction.respond(accepted());
        mock.receipt
            .respond(half_done)
            .respond(committed_receipt(tx.hash(), receipt(ExitStatus::Success)));

        writer.submit_and_confirm_transaction(&tx).await.unwrap();
        assert_eq!(mock.receipt.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unconfirmed_transaction_times_out() {
        let (mock, writer) = writer();
        let writer = writer.with_policies(
            SUBMIT_RETRY_POLICY,
            PollPolicy {
                max_attempts: 3,
                interval: Duration::from_millis(100),
            },
        );
        let tx = signed_transfer(3);
        mock.submit_transaction.respond(accepted());
        for _ in 0..3 {
            mock.receipt.respond(pending_receipt(tx.hash()));
        }

        let result = writer.submit_and_confirm_transaction(&tx).await;
        assert!(matches!(result, Err(BlockchainError::Timeout(_))));
        assert_eq!(mock.receipt.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transfer_token() {
        let (mock, writer) = writer();
        let keypair = keypair();
        mock.state.respond(state_response(vec![(
            keypair.public_key(),
            Some(Account::WithoutContract { nonce: 41, balance: 1_000 }),
        )]));
        mock.submit_transaction.respond(accepted());
        mock.receipt.respond(committed_receipt(
            Sha256Hash::default(),
            receipt(ExitStatus::Success),
        ));

        let recipient = PublicAddress::new([2; 32]);
        let hash = writer.transfer_token(recipient, 5, &keypair).await.unwrap();

        let submitted = &mock.submit_transaction.requests()[0].transaction;
        assert_eq!(submitted.hash(), hash);
        assert_eq!(submitted.transaction().nonce, 41);
        assert_eq!(submitted.transaction().commands[0].attached_amount(), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_transfer_is_execution_error() {
        let (mock, writer) = writer();
        mock.state.respond(state_response(Vec::new()));
        mock.submit_transaction.respond(accepted());
        mock.receipt.respond(committed_receipt(
            Sha256Hash::default(),
            receipt(ExitStatus::Failed),
        ));

        let result = writer
            .transfer_token(PublicAddress::new([2; 32]), 5, &keypair())
            .await;
        assert!(matches!(result, Err(BlockchainError::ExecutionFailed(_))));
        // Fresh account: nonce zero.
        assert_eq!(mock.submit_transaction.requests()[0].transaction.transaction().nonce, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_contract_state_change() {
        let (mock, writer) = writer();
        let keypair = keypair();
        mock.state.respond(state_response(vec![(
            keypair.public_key(),
            Some(Account::WithoutContract { nonce: 2, balance: 0 }),
        )]));
        mock.submit_transaction.respond(accepted());
        mock.receipt.respond(committed_receipt(
            Sha256Hash::default(),
            receipt(ExitStatus::Failed),
        ));

        let target = PublicAddress::new([8; 32]);
        let outcome = writer
            .call_contract_state_change(
                target,
                "set_owner",
                Some(vec![vec![1, 2, 3]]),
                Some(10),
                &keypair,
                1_000_000,
            )
            .await
            .unwrap();

        // Failure status is reported, not raised.
        assert_eq!(outcome.exit_status, ExitStatus::Failed);
        let submitted = mock.submit_transaction.requests()[0].transaction.clone();
        assert_eq!(submitted.transaction().gas_limit, 1_000_000);
        assert_eq!(submitted.transaction().nonce, 2);
        match &submitted.transaction().commands[0] {
            crate::primitives::Command::Call(call) => {
                assert_eq!(call.target, target);
                assert_eq!(call.method, "set_owner");
                assert_eq!(call.amount, Some(10));
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_gas_limit_checked_before_submission() {
        let (mock, writer) = writer();
        mock.state.respond(state_response(Vec::new()));

        let result = writer
            .call_contract_state_change(
                PublicAddress::new([8; 32]),
                "m",
                None,
                None,
                &keypair(),
                crate::primitives::MAX_GAS_LIMIT + 1,
            )
            .await;
        assert!(matches!(result, Err(BlockchainError::Validation(_))));
        assert_eq!(mock.submit_transaction.calls(), 0);
    }

    #[tokio::test]
    async fn test_call_contract_view() {
        let (mock, writer) = writer();
        mock.view.respond(ViewResponse {
            receipt: command_receipt(ExitStatus::Success),
        });

        let target = PublicAddress::new([8; 32]);
        let receipt = writer
            .call_contract_view(target.to_base64url(), "get_count", None)
            .await
            .unwrap();

        assert!(receipt.is_success());
        let request = &mock.view.requests()[0];
        assert_eq!(request.target, target);
        assert_eq!(request.method, b"get_count".to_vec());
        assert_eq!(mock.submit_transaction.calls(), 0);
    }
}
