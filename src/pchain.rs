//! Single entry point over one node endpoint.

use std::sync::Arc;

use crate::blockchain::{
    derive_contract_address, BlockId, BlockchainResult, Keypair, Reader, TransactionBuilder,
    TransactionResult, Writer,
};
use crate::config::SdkConfig;
use crate::primitives::{Block, CommandReceipt, PublicAddress, Receipt, Sha256Hash, SignedTx, ToAddress, ToHash};
use crate::rpc::{HttpRpcClient, RpcClient};

/// Reader, writer and transaction building sharing one RPC client.
#[derive(Debug, Clone)]
pub struct PChain {
    reader: Reader,
    writer: Writer,
}

impl PChain {
    /// Connect to `endpoint` with default timeout and policies.
    pub fn new(endpoint: &str) -> BlockchainResult<Self> {
        Ok(Self::with_client(Arc::new(HttpRpcClient::new(endpoint)?)))
    }

    pub fn from_config(config: &SdkConfig) -> BlockchainResult<Self> {
        let writer = Writer::with_config(config)?;
        Ok(Self {
            reader: writer.reader().clone(),
            writer,
        })
    }

    pub fn with_client(client: Arc<dyn RpcClient>) -> Self {
        let writer = Writer::with_client(client);
        Self {
            reader: writer.reader().clone(),
            writer,
        }
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    pub fn writer(&self) -> &Writer {
        &self.writer
    }

    /// Start a transaction signed by `keypair` at `nonce`.
    pub fn build_transaction(&self, keypair: Keypair, nonce: u64) -> TransactionBuilder {
        TransactionBuilder::new(keypair, nonce)
    }

    pub fn derive_contract_address<N: TryInto<u64>>(
        &self,
        deployer: &PublicAddress,
        nonce: N,
    ) -> BlockchainResult<PublicAddress> {
        derive_contract_address(deployer, nonce)
    }

    pub async fn get_account_balance(&self, address: impl ToAddress) -> BlockchainResult<u64> {
        self.reader.get_account_balance(address).await
    }

    pub async fn get_account_nonce(&self, address: impl ToAddress) -> BlockchainResult<u64> {
        self.reader.get_account_nonce(address).await
    }

    pub async fn get_contract_code(
        &self,
        address: impl ToAddress,
    ) -> BlockchainResult<Option<Vec<u8>>> {
        self.reader.get_contract_code(address).await
    }

    pub async fn get_block(&self, id: impl Into<BlockId>) -> BlockchainResult<Option<Block>> {
        self.reader.get_block(id).await
    }

    pub async fn get_latest_committed_block(&self) -> BlockchainResult<Block> {
        self.reader.get_latest_committed_block().await
    }

    pub async fn get_transaction(
        &self,
        hash: impl ToHash,
    ) -> BlockchainResult<Option<TransactionResult>> {
        self.reader.get_transaction(hash).await
    }

    pub async fn submit_transaction(&self, transaction: &SignedTx) -> BlockchainResult<Sha256Hash> {
        self.writer.submit_transaction(transaction).await
    }

    pub async fn submit_and_confirm_transaction(
        &self,
        transaction: &SignedTx,
    ) -> BlockchainResult<Receipt> {
        self.writer.submit_and_confirm_transaction(transaction).await
    }

    pub async fn call_contract_view(
        &self,
        target: impl ToAddress,
        method: &str,
        arguments: Option<Vec<Vec<u8>>>,
    ) -> BlockchainResult<CommandReceipt> {
        self.writer.call_contract_view(target, method, arguments).await
    }

    pub async fn call_contract_state_change(
        &self,
        target: impl ToAddress,
        method: &str,
        arguments: Option<Vec<Vec<u8>>>,
        amount: Option<u64>,
        keypair: &Keypair,
        gas_limit: u64,
    ) -> BlockchainResult<CommandReceipt> {
        self.writer
            .call_contract_state_change(target, method, arguments, amount, keypair, gas_limit)
            .await
    }

    pub async fn transfer_token(
        &self,
        recipient: impl ToAddress,
        amount: u64,
        keypair: &Keypair,
    ) -> BlockchainResult<Sha256Hash> {
        self.writer.transfer_token(recipient, amount, keypair).await
    }
}
