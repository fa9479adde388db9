use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;

use crate::error::CoreError;
use crate::network::ChainFamily;
use crate::transport::Transport;
use crate::types::LookupResult;
use crate::units::{from_base_units, json_u128, json_u64, LAMPORT_DECIMALS};

use super::jsonrpc::JsonRpcEndpoint;
use super::{json_str, ChainLookup};

/// Solana JSON-RPC `getTransaction` with parsed instructions.
pub struct SolanaClient {
    rpc: JsonRpcEndpoint,
}

impl SolanaClient {
    pub fn new(transport: Arc<dyn Transport>, rpc_url: Url) -> Self {
        Self {
            rpc: JsonRpcEndpoint::new(transport, rpc_url),
        }
    }
}

#[async_trait]
impl ChainLookup for SolanaClient {
    async fn lookup(&self, tx_hash: &str) -> Result<LookupResult, CoreError> {
        let tx = self
            .rpc
            .call(
                "getTransaction",
                json!([
                    tx_hash,
                    { "encoding": "jsonParsed", "maxSupportedTransactionVersion": 0 }
                ]),
            )
            .await?;
        if tx.is_null() {
            return Ok(LookupResult::not_found(ChainFamily::Solana));
        }
        if !tx.is_object() {
            return Err(CoreError::invalid_response(format!(
                "getTransaction returned non-object: {tx}"
            )));
        }

        let slot = json_u64(tx.get("slot"));
        let meta = tx.get("meta");

        let mut result = LookupResult::found(ChainFamily::Solana);
        result.confirmed = Some(slot.is_some());
        result.success = Some(
            meta.and_then(|m| m.get("err"))
                .map_or(true, serde_json::Value::is_null),
        );
        result.block_number = slot;
        result.fee = json_u128(meta.and_then(|m| m.get("fee")))
            .map(|lamports| from_base_units(lamports, LAMPORT_DECIMALS));

        let message = tx.pointer("/transaction/message");
        let transfer = message
            .and_then(|m| m.get("instructions"))
            .and_then(serde_json::Value::as_array)
            .and_then(|ixs| ixs.iter().find(|ix| is_system_transfer(ix)));

        match transfer {
            Some(ix) => {
                let info = &ix["parsed"]["info"];
                result.from = json_str(info.get("source"));
                result.to = json_str(info.get("destination"));
                result.value = json_u128(info.get("lamports"))
                    .map(|lamports| from_base_units(lamports, LAMPORT_DECIMALS));
            }
            None => {
                result.from = message
                    .and_then(|m| m.get("accountKeys"))
                    .and_then(serde_json::Value::as_array)
                    .and_then(|keys| keys.first())
                    .and_then(account_key);
            }
        }
        Ok(result)
    }
}

fn is_system_transfer(ix: &serde_json::Value) -> bool {
    ix.get("program").and_then(|p| p.as_str()) == Some("system")
        && ix.pointer("/parsed/type").and_then(|t| t.as_str()) == Some("transfer")
}

/// Account keys are plain strings in `json` encoding and `{pubkey, ...}`
/// objects in `jsonParsed`.
fn account_key(key: &serde_json::Value) -> Option<String> {
    json_str(Some(key)).or_else(|| json_str(key.get("pubkey")))
}
