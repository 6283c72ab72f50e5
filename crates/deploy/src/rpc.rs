//! JSON-RPC helper for querying the chain endpoint.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

/// JSON-RPC response wrapper.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: T,
}

/// A block height encoded as a 0x-prefixed hex quantity.
#[derive(Debug, Deserialize)]
struct BlockNumber(#[serde(deserialize_with = "deserialize_u64_from_hex")] u64);

/// Deserialize a u64 from a hex string (with 0x prefix).
fn deserialize_u64_from_hex<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    u64::from_str_radix(s.trim_start_matches("0x"), 16).map_err(serde::de::Error::custom)
}

/// Fetch the current block height from an Ethereum JSON-RPC endpoint.
///
/// No request timeout is set; an unresponsive endpoint blocks the run.
pub async fn fetch_block_number(rpc_url: &str) -> Result<u64> {
    let client = reqwest::Client::new();
    let response = client
        .post(rpc_url)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_blockNumber",
            "params": [],
            "id": 1
        }))
        .send()
        .await
        .context("Failed to send eth_blockNumber request")?;

    let json: JsonRpcResponse<BlockNumber> = response
        .json()
        .await
        .context("Failed to parse eth_blockNumber response")?;

    Ok(json.result.0)
}
