//! HTTP transport for the node RPC.
//!
//! # Responsibilities
//! - POST borsh-encoded requests to `{endpoint}/{route}`
//! - Decode borsh responses into typed messages
//! - Bound every call with a timeout and report failures distinctly

use std::time::Duration;

use async_trait::async_trait;
use borsh::{BorshDeserialize, BorshSerialize};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::observability::metrics;
use crate::resilience::timeouts::with_timeout;
use crate::rpc::messages::*;
use crate::rpc::RpcClient;

/// Default per-request deadline.
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

const OCTET_STREAM: &str = "application/octet-stream";

/// RPC client bound to a single node endpoint.
#[derive(Clone)]
pub struct HttpRpcClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout_duration: Duration,
}

impl HttpRpcClient {
    /// Create a client with the default timeout.
    pub fn new(endpoint: &str) -> BlockchainResult<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS))
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> BlockchainResult<Self> {
        Self::with_http_client(endpoint, reqwest::Client::new(), timeout)
    }

    /// Create a client on top of a preconfigured `reqwest::Client`.
    pub fn with_http_client(
        endpoint: &str,
        http: reqwest::Client,
        timeout: Duration,
    ) -> BlockchainResult<Self> {
        let endpoint = parse_endpoint(endpoint)?;

        tracing::debug!(
            endpoint = %endpoint,
            timeout_secs = timeout.as_secs(),
            "RPC client initialized"
        );

        Ok(Self {
            http,
            endpoint,
            timeout_duration: timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// True if the node answers a highest-committed-block query.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.highest_committed_block().await.is_ok();
        metrics::record_endpoint_health(healthy);
        healthy
    }

    fn route_url(&self, route: &str) -> BlockchainResult<Url> {
        self.endpoint
            .join(route)
            .map_err(|e| BlockchainError::Rpc(format!("Invalid route '{}': {}", route, e)))
    }

    async fn call<Req, Resp>(&self, route: &'static str, request: &Req) -> BlockchainResult<Resp>
    where
        Req: BorshSerialize,
        Resp: BorshDeserialize,
    {
        let body = borsh::to_vec(request)
            .map_err(|e| BlockchainError::Rpc(format!("Cannot encode {} request: {}", route, e)))?;
        let bytes = self.post(route, body).await?;
        decode(route, &bytes)
    }

    async fn post(&self, route: &'static str, body: Vec<u8>) -> BlockchainResult<Vec<u8>> {
        let url = self.route_url(route)?;

        let outcome = with_timeout(self.timeout_duration, async {
            let response = self
                .http
                .post(url)
                .header(CONTENT_TYPE, OCTET_STREAM)
                .body(body)
                .send()
                .await
                .map_err(|e| BlockchainError::Rpc(format!("{} request failed: {}", route, e)))?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(BlockchainError::Rpc(format!(
                    "{} returned status {}: {}",
                    route, status, text
                )));
            }

            let bytes = response.bytes().await.map_err(|e| {
                BlockchainError::Rpc(format!("{} response could not be read: {}", route, e))
            })?;
            Ok(bytes.to_vec())
        })
        .await;

        metrics::record_rpc_request(route, outcome.is_ok());
        if let Err(e) = &outcome {
            tracing::warn!(route, error = %e, "RPC call failed");
        }
        outcome
    }
}

fn parse_endpoint(endpoint: &str) -> BlockchainResult<Url> {
    let mut url: Url = endpoint.parse().map_err(|e| {
        BlockchainError::Validation(format!("Invalid RPC URL '{}': {}", endpoint, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(BlockchainError::Validation(format!(
            "Unsupported RPC URL scheme '{}'",
            url.scheme()
        )));
    }
    // Url::join replaces the last path segment unless the base ends in '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn decode<Resp: BorshDeserialize>(route: &str, bytes: &[u8]) -> BlockchainResult<Resp> {
    borsh::from_slice(bytes)
        .map_err(|e| BlockchainError::Rpc(format!("Malformed {} response: {}", route, e)))
}

#[async_trait]
impl RpcClient for HttpRpcClient {
    async fn state(&self, request: StateRequest) -> BlockchainResult<StateResponse> {
        self.call("state", &request).await
    }

    async fn block(&self, request: BlockRequest) -> BlockchainResult<BlockResponse> {
        self.call("block", &request).await
    }

    async fn block_hash_by_height(
        &self,
        request: BlockHashByHeightRequest,
    ) -> BlockchainResult<BlockHashByHeightResponse> {
        self.call("block_hash_by_height", &request).await
    }

    async fn highest_committed_block(&self) -> BlockchainResult<HighestCommittedBlockResponse> {
        let bytes = self.post("highest_committed_block", Vec::new()).await?;
        decode("highest_committed_block", &bytes)
    }

    async fn transaction(
        &self,
        request: TransactionRequest,
    ) -> BlockchainResult<TransactionResponse> {
        self.call("transaction", &request).await
    }

    async fn receipt(
        &self,
        request: TransactionPositionRequest,
    ) -> BlockchainResult<ReceiptResponse> {
        self.call("receipt", &request).await
    }

    async fn submit_transaction(
        &self,
        request: SubmitTransactionRequest,
    ) -> BlockchainResult<SubmitTransactionResponse> {
        self.call("submit_transaction", &request).await
    }

    async fn view(&self, request: ViewRequest) -> BlockchainResult<ViewResponse> {
        self.call("view", &request).await
    }
}

impl std::fmt::Debug for HttpRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRpcClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
