use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::CoreError;
use crate::network::{ChainFamily, Network};
use crate::transport::Transport;
use crate::types::LookupResult;
use crate::units::{json_u64, sats_to_coin};

use super::{endpoint, json_str, ChainLookup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtxoChain {
    Litecoin,
    Dogecoin,
}

impl UtxoChain {
    pub fn for_network(network: Network) -> Option<Self> {
        match network {
            Network::Ltc => Some(Self::Litecoin),
            Network::Doge => Some(Self::Dogecoin),
            _ => None,
        }
    }

    fn path(self) -> &'static str {
        match self {
            Self::Litecoin => "litecoin",
            Self::Dogecoin => "dogecoin",
        }
    }
}

/// Blockchair multi-chain explorer, used for Litecoin and Dogecoin.
pub struct BlockchairClient {
    transport: Arc<dyn Transport>,
    base: Url,
    chain: UtxoChain,
}

impl BlockchairClient {
    pub fn new(transport: Arc<dyn Transport>, base: Url, chain: UtxoChain) -> Self {
        Self {
            transport,
            base,
            chain,
        }
    }
}

#[async_trait]
impl ChainLookup for BlockchairClient {
    async fn lookup(&self, tx_hash: &str) -> Result<LookupResult, CoreError> {
        let url = endpoint(
            &self.base,
            &[self.chain.path(), "dashboards", "transaction", tx_hash],
        )?;
        let reply = self.transport.get(&url).await?;
        if reply.status == 404 {
            return Ok(LookupResult::not_found(ChainFamily::Utxo));
        }
        let body = reply.into_json()?;

        // `data` is keyed by hash; an unknown hash yields `[]` or `{}`.
        let entry = match body.get("data") {
            Some(serde_json::Value::Object(map)) => map
                .get(tx_hash)
                .or_else(|| map.values().next())
                .cloned(),
            Some(serde_json::Value::Array(_)) | Some(serde_json::Value::Null) => None,
            _ => return Err(CoreError::invalid_response("missing `data` in Blockchair response")),
        };
        let Some(entry) = entry.filter(|e| e.get("transaction").is_some()) else {
            return Ok(LookupResult::not_found(ChainFamily::Utxo));
        };

        let tx = &entry["transaction"];
        let block_id = tx.get("block_id").and_then(serde_json::Value::as_i64);
        let confirmed = block_id.is_some_and(|id| id >= 0);

        let inputs = entry.get("inputs").and_then(serde_json::Value::as_array);
        let outputs = entry.get("outputs").and_then(serde_json::Value::as_array);

        let mut result = LookupResult::found(ChainFamily::Utxo);
        result.confirmed = Some(confirmed);
        result.success = Some(confirmed);
        result.block_number = block_id
            .filter(|_| confirmed)
            .and_then(|id| u64::try_from(id).ok());
        result.from = inputs
            .and_then(|i| i.first())
            .and_then(|input| json_str(input.get("recipient")));
        result.to = outputs.and_then(|o| o.iter().find_map(|out| json_str(out.get("recipient"))));
        let total: u64 = outputs
            .map(|o| o.iter().filter_map(|out| json_u64(out.get("value"))).sum())
            .unwrap_or_else(|| json_u64(tx.get("output_total")).unwrap_or(0));
        result.value = Some(sats_to_coin(total));
        result.fee = json_u64(tx.get("fee")).map(sats_to_coin);
        result.size = json_u64(tx.get("size"));
        Ok(result)
    }
}
