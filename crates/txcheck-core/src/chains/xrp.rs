use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;

use crate::error::{CoreError, UpstreamError};
use crate::network::ChainFamily;
use crate::transport::Transport;
use crate::types::LookupResult;
use crate::units::{from_base_units, json_u64, DROP_DECIMALS};

use super::jsonrpc::JsonRpcEndpoint;
use super::{json_str, ChainLookup};

const TX_NOT_FOUND: &str = "txnNotFound";
const TX_SUCCESS: &str = "tesSUCCESS";

/// rippled JSON-RPC `tx` method.
pub struct XrpClient {
    rpc: JsonRpcEndpoint,
}

impl XrpClient {
    pub fn new(transport: Arc<dyn Transport>, rpc_url: Url) -> Self {
        Self {
            rpc: JsonRpcEndpoint::new(transport, rpc_url),
        }
    }
}

#[async_trait]
impl ChainLookup for XrpClient {
    async fn lookup(&self, tx_hash: &str) -> Result<LookupResult, CoreError> {
        let tx = self
            .rpc
            .call("tx", json!([{ "transaction": tx_hash, "binary": false }]))
            .await?;

        // rippled reports failures inside `result` rather than as a JSON-RPC error.
        if let Some(error) = tx.get("error").and_then(|e| e.as_str()) {
            if error == TX_NOT_FOUND {
                return Ok(LookupResult::not_found(ChainFamily::Xrp));
            }
            let message = tx
                .get("error_message")
                .and_then(|m| m.as_str())
                .unwrap_or(error)
                .to_owned();
            return Err(UpstreamError::ServerError {
                code: tx.get("error_code").and_then(|c| c.as_i64()).unwrap_or(0),
                message,
            }
            .into());
        }
        if !tx.is_object() {
            return Err(CoreError::invalid_response(format!("unexpected tx result: {tx}")));
        }

        let mut result = LookupResult::found(ChainFamily::Xrp);
        result.confirmed = Some(tx.get("validated").and_then(|v| v.as_bool()).unwrap_or(false));
        result.success = Some(
            tx.pointer("/meta/TransactionResult").and_then(|r| r.as_str()) == Some(TX_SUCCESS),
        );
        result.from = json_str(tx.get("Account"));
        result.to = json_str(tx.get("Destination"));
        // Issued-currency amounts are objects; only native XRP drops are converted.
        result.value = tx
            .get("Amount")
            .and_then(|a| a.as_str())
            .and_then(|drops| drops.parse::<u128>().ok())
            .map(|drops| from_base_units(drops, DROP_DECIMALS));
        result.fee = tx
            .get("Fee")
            .and_then(|f| f.as_str())
            .and_then(|drops| drops.parse::<u128>().ok())
            .map(|drops| from_base_units(drops, DROP_DECIMALS));
        result.block_number = json_u64(tx.get("ledger_index"));
        Ok(result)
    }
}
