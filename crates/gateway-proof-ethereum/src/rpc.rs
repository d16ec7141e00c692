//! JSON-RPC ledger client
//!
//! HTTP transport for the two node calls the proof pipeline needs:
//! `eth_getBlockByNumber` and `eth_getProof`. Retries and timeouts are left
//! to the underlying `reqwest::Client`.

use gateway_proof_core::{
    BlockSummary, GatewayProofError, LedgerClient, RawAccountProof, StorageSlotKey,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: serde_json::Value,
    id: u64,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

/// Error member of a JSON-RPC response
#[derive(Debug, Deserialize, thiserror::Error)]
#[error("JSON-RPC error {code}: {message}")]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Ledger client speaking JSON-RPC over HTTP
///
/// # Usage
///
/// ```rust,ignore
/// use gateway_proof_ethereum::JsonRpcClient;
///
/// let client = JsonRpcClient::new("http://localhost:8546")?;
/// let block = client.block_by_tag("latest").await?;
/// ```
///
/// # Network Requirements
///
/// Requires a node that serves `eth_getProof` (EIP-1186). Most modern
/// Ethereum clients (geth, erigon, etc.) support it for recent blocks; older
/// blocks need an archive node.
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    url: reqwest::Url,
    client: reqwest::Client,
}

impl JsonRpcClient {
    /// Create a client for the given endpoint
    ///
    /// # Errors
    ///
    /// - `GatewayProofError::Config` - the endpoint is not a valid URL
    pub fn new(rpc_url: &str) -> Result<Self, GatewayProofError> {
        Self::with_client(rpc_url, reqwest::Client::new())
    }

    /// Create a client reusing a configured `reqwest::Client`
    pub fn with_client(rpc_url: &str, client: reqwest::Client) -> Result<Self, GatewayProofError> {
        let url = reqwest::Url::parse(rpc_url).map_err(|e| {
            GatewayProofError::Config(format!("invalid RPC URL '{}': {}", rpc_url, e))
        })?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Issue one JSON-RPC call and decode its result
    ///
    /// The `error` member is checked before `result`, so a node error is
    /// never masked by a partial result in the same response.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, GatewayProofError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };
        debug!(method, url = %self.url, "sending JSON-RPC request");

        let response = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| GatewayProofError::retrieval(format!("{} request failed", method), e))?;

        let envelope: JsonRpcResponse = response.json().await.map_err(|e| {
            GatewayProofError::retrieval(format!("failed to parse {} response", method), e)
        })?;

        if let Some(error) = envelope.error {
            return Err(GatewayProofError::retrieval(
                format!("{} returned an error", method),
                error,
            ));
        }

        match envelope.result {
            Some(serde_json::Value::Null) | None => Err(GatewayProofError::retrieval(
                method,
                format!("{} returned no result", method),
            )),
            Some(value) => serde_json::from_value(value).map_err(|e| {
                GatewayProofError::retrieval(format!("unexpected {} result shape", method), e)
            }),
        }
    }
}

impl LedgerClient for JsonRpcClient {
    async fn block_by_tag(&self, tag: &str) -> Result<BlockSummary, GatewayProofError> {
        self.call("eth_getBlockByNumber", serde_json::json!([tag, false]))
            .await
    }

    async fn get_proof(
        &self,
        address: &str,
        storage_keys: &[StorageSlotKey],
        block: &str,
    ) -> Result<RawAccountProof, GatewayProofError> {
        let keys: Vec<String> = storage_keys.iter().map(StorageSlotKey::to_hex).collect();
        self.call("eth_getProof", serde_json::json!([address, keys, block]))
            .await
    }
}
