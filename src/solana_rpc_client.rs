//! Solana JSON-RPC client
//!
//! Thin wrapper over the two RPC methods the reconciler needs: `getBlocks`
//! to list produced slots in a range and `getSlot` to see how far the node
//! has progressed.

use crate::block_source::{BlockSource, Commitment};
use crate::epoch::Slot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// RPC client configuration
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// RPC URL (e.g., "https://api.mainnet-beta.solana.com")
    pub url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl RpcConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Solana RPC client
pub struct SolanaRpcClient {
    client: Client,
    config: RpcConfig,
}

impl SolanaRpcClient {
    /// Create a new RPC client
    pub fn new(config: RpcConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Make an RPC call
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let response = self
            .client
            .post(&self.config.url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("{} request failed", method))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{} request failed with status: {}", method, status);
        }

        let json: Value = response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", method))?;

        if let Some(error) = json.get("error") {
            if !error.is_null() {
                anyhow::bail!("RPC error from {}: {}", method, error);
            }
        }

        json.get("result")
            .cloned()
            .with_context(|| format!("{} response missing result", method))
    }

    /// List produced slots in `[start, end]`
    pub async fn get_blocks(
        &self,
        start: Slot,
        end: Slot,
        commitment: Commitment,
    ) -> Result<Vec<Slot>> {
        let params = serde_json::json!([start, end, { "commitment": commitment }]);
        let result = self.call("getBlocks", params).await?;
        parse_blocks_result(&result)
    }

    /// Current slot of the node at `commitment`
    pub async fn get_slot(&self, commitment: Commitment) -> Result<Slot> {
        let params = serde_json::json!([{ "commitment": commitment }]);
        let result = self.call("getSlot", params).await?;
        result.as_u64().context("Invalid getSlot response")
    }
}

#[async_trait]
impl BlockSource for SolanaRpcClient {
    async fn get_blocks(
        &self,
        start: Slot,
        end: Slot,
        commitment: Commitment,
    ) -> Result<Vec<Slot>> {
        SolanaRpcClient::get_blocks(self, start, end, commitment).await
    }

    async fn latest_slot(&self, commitment: Commitment) -> Result<Option<Slot>> {
        self.get_slot(commitment).await.map(Some)
    }
}

/// Decode a `getBlocks` result: an array of slot numbers
pub fn parse_blocks_result(result: &Value) -> Result<Vec<Slot>> {
    let blocks = result
        .as_array()
        .context("Unexpected getBlocks response format")?;
    blocks
        .iter()
        .map(|v| {
            v.as_u64()
                .with_context(|| format!("Invalid slot in getBlocks response: {}", v))
        })
        .collect()
}
