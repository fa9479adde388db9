use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;

use crate::error::CoreError;
use crate::network::ChainFamily;
use crate::transport::Transport;
use crate::types::LookupResult;
use crate::units::{from_base_units, json_u128, json_u64, SUN_DECIMALS};

use super::{endpoint, json_str, ChainLookup};

const CONTRACT_SUCCESS: &str = "SUCCESS";
const TRANSFER_CONTRACT: &str = "TransferContract";

/// TronGrid full-node HTTP API.
pub struct TronClient {
    transport: Arc<dyn Transport>,
    base: Url,
}

impl TronClient {
    pub fn new(transport: Arc<dyn Transport>, base: Url) -> Self {
        Self { transport, base }
    }

    /// POST a wallet servlet. java-tron reports bad input as HTTP 200 with
    /// an `Error` field, which is rejected here as an invalid response.
    async fn wallet_call(&self, method: &str, tx_hash: &str) -> Result<serde_json::Value, CoreError> {
        let url = endpoint(&self.base, &["wallet", method])?;
        let body = json!({ "value": tx_hash, "visible": true });
        let reply = self.transport.post_json(&url, &body).await?.into_json()?;
        let Some(map) = reply.as_object() else {
            return Err(CoreError::invalid_response(format!(
                "{method} returned non-object: {reply}"
            )));
        };
        if let Some(error) = map.get("Error") {
            return Err(CoreError::invalid_response(format!("{method} error: {error}")));
        }
        Ok(reply)
    }
}

#[async_trait]
impl ChainLookup for TronClient {
    async fn lookup(&self, tx_hash: &str) -> Result<LookupResult, CoreError> {
        let tx = self.wallet_call("gettransactionbyid", tx_hash).await?;
        if tx.as_object().is_some_and(serde_json::Map::is_empty) {
            return Ok(LookupResult::not_found(ChainFamily::Tron));
        }
        if !is_record(&tx) {
            return Err(CoreError::invalid_response(format!(
                "gettransactionbyid returned unexpected object: {tx}"
            )));
        }

        let mut result = LookupResult::found(ChainFamily::Tron);
        result.success = Some(
            tx.pointer("/ret/0/contractRet").and_then(|r| r.as_str()) == Some(CONTRACT_SUCCESS),
        );

        let contract = tx.pointer("/raw_data/contract/0");
        if contract.and_then(|c| c.get("type")).and_then(|t| t.as_str()) == Some(TRANSFER_CONTRACT)
        {
            let value = contract.and_then(|c| c.pointer("/parameter/value"));
            result.from = json_str(value.and_then(|v| v.get("owner_address")));
            result.to = json_str(value.and_then(|v| v.get("to_address")));
            result.value = json_u128(value.and_then(|v| v.get("amount")))
                .map(|sun| from_base_units(sun, SUN_DECIMALS));
        }

        // An unpacked transaction answers `{}` here.
        let info = self.wallet_call("gettransactioninfobyid", tx_hash).await?;
        let block_number = json_u64(info.get("blockNumber"));
        result.confirmed = Some(block_number.is_some());
        result.block_number = block_number;
        result.fee = json_u128(info.get("fee")).map(|sun| from_base_units(sun, SUN_DECIMALS));
        Ok(result)
    }
}

/// TronGrid answers an unknown id with `{}`; a real record carries its id
/// or raw data.
fn is_record(value: &serde_json::Value) -> bool {
    value.get("txID").is_some() || value.get("raw_data").is_some()
}
