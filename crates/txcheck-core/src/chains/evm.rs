use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;

use crate::error::CoreError;
use crate::network::ChainFamily;
use crate::transport::Transport;
use crate::types::LookupResult;
use crate::units::{parse_hex_u64, wei_hex_to_display};

use super::jsonrpc::JsonRpcEndpoint;
use super::{json_str, ChainLookup};

const RECEIPT_STATUS_SUCCESS: &str = "0x1";

/// Ethereum-style JSON-RPC node: transaction first, receipt second.
pub struct EvmClient {
    rpc: JsonRpcEndpoint,
}

impl EvmClient {
    pub fn new(transport: Arc<dyn Transport>, rpc_url: Url) -> Self {
        Self {
            rpc: JsonRpcEndpoint::new(transport, rpc_url),
        }
    }
}

#[async_trait]
impl ChainLookup for EvmClient {
    async fn lookup(&self, tx_hash: &str) -> Result<LookupResult, CoreError> {
        let tx = self
            .rpc
            .call("eth_getTransactionByHash", json!([tx_hash]))
            .await?;
        if tx.is_null() {
            return Ok(LookupResult::not_found(ChainFamily::Evm));
        }
        if !tx.is_object() {
            return Err(CoreError::invalid_response(format!(
                "eth_getTransactionByHash returned non-object: {tx}"
            )));
        }

        // Only meaningful once the transaction is known to exist.
        let receipt = self
            .rpc
            .call("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;

        let mut result = LookupResult::found(ChainFamily::Evm);
        result.from = json_str(tx.get("from"));
        result.to = json_str(tx.get("to"));
        result.value = Some(wei_hex_to_display(
            tx.get("value").and_then(|v| v.as_str()).unwrap_or("0x0"),
        )?);

        if receipt.is_null() {
            result.confirmed = Some(false);
            return Ok(result);
        }

        result.confirmed = Some(true);
        result.success = Some(
            receipt.get("status").and_then(|s| s.as_str()) == Some(RECEIPT_STATUS_SUCCESS),
        );
        result.block_number = hex_field(&receipt, "blockNumber")?;
        result.gas_used = hex_field(&receipt, "gasUsed")?;
        Ok(result)
    }
}

fn hex_field(obj: &serde_json::Value, field: &str) -> Result<Option<u64>, CoreError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(parse_hex_u64)
        .transpose()
}
