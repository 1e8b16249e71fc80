//! Scripted `RpcClient` for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::primitives::{
    Account, Block, BlockHeader, CommandReceipt, ExitStatus, PublicAddress, Receipt, Sha256Hash,
};
use crate::rpc::messages::*;
use crate::rpc::RpcClient;

/// Queued responses for one route plus the requests it received.
pub(crate) struct Script<Req, Resp> {
    responses: Mutex<VecDeque<BlockchainResult<Resp>>>,
    requests: Mutex<Vec<Req>>,
}

impl<Req, Resp> Default for Script<Req, Resp> {
    fn default() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl<Req: Clone, Resp> Script<Req, Resp> {
    pub fn push(&self, response: BlockchainResult<Resp>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn respond(&self, response: Resp) -> &Self {
        self.push(Ok(response))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Req> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self, route: &str, request: Req) -> BlockchainResult<Resp> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BlockchainError::Rpc(format!("no scripted {} response", route))))
    }
}

#[derive(Default)]
pub(crate) struct MockRpcClient {
    pub state: Script<StateRequest, StateResponse>,
    pub block: Script<BlockRequest, BlockResponse>,
    pub block_hash_by_height: Script<BlockHashByHeightRequest, BlockHashByHeightResponse>,
    pub highest_committed_block: Script<(), HighestCommittedBlockResponse>,
    pub transaction: Script<TransactionRequest, TransactionResponse>,
    pub receipt: Script<TransactionPositionRequest, ReceiptResponse>,
    pub submit_transaction: Script<SubmitTransactionRequest, SubmitTransactionResponse>,
    pub view: Script<ViewRequest, ViewResponse>,
}

#[async_trait]
impl RpcClient for MockRpcClient {
    async fn state(&self, request: StateRequest) -> BlockchainResult<StateResponse> {
        self.state.next("state", request)
    }

    async fn block(&self, request: BlockRequest) -> BlockchainResult<BlockResponse> {
        self.block.next("block", request)
    }

    async fn block_hash_by_height(
        &self,
        request: BlockHashByHeightRequest,
    ) -> BlockchainResult<BlockHashByHeightResponse> {
        self.block_hash_by_height.next("block_hash_by_height", request)
    }

    async fn highest_committed_block(&self) -> BlockchainResult<HighestCommittedBlockResponse> {
        self.highest_committed_block.next("highest_committed_block", ())
    }

    async fn transaction(
        &self,
        request: TransactionRequest,
    ) -> BlockchainResult<TransactionResponse> {
        self.transaction.next("transaction", request)
    }

    async fn receipt(
        &self,
        request: TransactionPositionRequest,
    ) -> BlockchainResult<ReceiptResponse> {
        self.receipt.next("receipt", request)
    }

    async fn submit_transaction(
        &self,
        request: SubmitTransactionRequest,
    ) -> BlockchainResult<SubmitTransactionResponse> {
        self.submit_transaction.next("submit_transaction", request)
    }

    async fn view(&self, request: ViewRequest) -> BlockchainResult<ViewResponse> {
        self.view.next("view", request)
    }
}

pub(crate) fn state_response(entries: Vec<(PublicAddress, Option<Account>)>) -> StateResponse {
    StateResponse {
        accounts: Some(entries),
        storage_tuples: Vec::new(),
        block_hash: Sha256Hash::new([0; 32]),
    }
}

pub(crate) fn command_receipt(exit_status: ExitStatus) -> CommandReceipt {
    CommandReceipt {
        exit_status,
        gas_used: 21,
        return_values: Vec::new(),
        logs: Vec::new(),
    }
}

pub(crate) fn receipt(exit_status: ExitStatus) -> Receipt {
    Receipt {
        command_receipts: vec![command_receipt(exit_status)],
    }
}

pub(crate) fn pending_receipt(transaction_hash: Sha256Hash) -> ReceiptResponse {
    ReceiptResponse {
        transaction_hash,
        receipt: None,
        block_hash: None,
        position: None,
    }
}

pub(crate) fn committed_receipt(transaction_hash: Sha256Hash, receipt: Receipt) -> ReceiptResponse {
    ReceiptResponse {
        transaction_hash,
        receipt: Some(receipt),
        block_hash: Some(Sha256Hash::new([0xbb; 32])),
        position: Some(0),
    }
}

pub(crate) fn empty_block(hash: Sha256Hash, height: u64) -> Block {
    Block {
        header: BlockHeader {
            hash,
            height,
            prev_hash: Sha256Hash::new([0; 32]),
            timestamp: 1_700_000_000,
            proposer: PublicAddress::new([1; 32]),
            base_fee_per_gas: 8,
            gas_used: 0,
        },
        transactions: Vec::new(),
        receipts: Vec::new(),
    }
}
