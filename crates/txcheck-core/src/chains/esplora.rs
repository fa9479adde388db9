use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::CoreError;
use crate::network::ChainFamily;
use crate::transport::Transport;
use crate::types::LookupResult;
use crate::units::{json_u64, sats_to_coin};

use super::{endpoint, json_str, ChainLookup};

/// Esplora-compatible block explorer REST API (mempool.space, blockstream.info).
pub struct EsploraClient {
    transport: Arc<dyn Transport>,
    base: Url,
}

impl EsploraClient {
    pub fn new(transport: Arc<dyn Transport>, base: Url) -> Self {
        Self { transport, base }
    }
}

#[async_trait]
impl ChainLookup for EsploraClient {
    async fn lookup(&self, tx_hash: &str) -> Result<LookupResult, CoreError> {
        let url = endpoint(&self.base, &["tx", tx_hash])?;
        let reply = self.transport.get(&url).await?;
        if reply.status == 404 {
            return Ok(LookupResult::not_found(ChainFamily::Btc));
        }
        let tx = reply.into_json()?;

        let status = tx.get("status");
        let block_height = json_u64(status.and_then(|s| s.get("block_height")));
        let confirmed = status
            .and_then(|s| s.get("confirmed"))
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
            && block_height.is_some();

        let vin = tx.get("vin").and_then(serde_json::Value::as_array);
        let vout = tx
            .get("vout")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| CoreError::invalid_response("missing vout array"))?;

        let mut result = LookupResult::found(ChainFamily::Btc);
        result.confirmed = Some(confirmed);
        result.success = Some(confirmed);
        result.block_number = block_height.filter(|_| confirmed);
        result.from = vin
            .and_then(|inputs| inputs.first())
            .and_then(|input| json_str(input.pointer("/prevout/scriptpubkey_address")));
        result.to = vout
            .iter()
            .find_map(|output| json_str(output.get("scriptpubkey_address")));
        let total_sats: u64 = vout
            .iter()
            .filter_map(|output| json_u64(output.get("value")))
            .sum();
        result.value = Some(sats_to_coin(total_sats));
        result.fee = json_u64(tx.get("fee")).map(sats_to_coin);
        result.size = json_u64(tx.get("size"));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::UpstreamError;
    use crate::transport::mock::MockTransport;

    fn client(mock: MockTransport) -> (EsploraClient, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let base = Url::parse("http://esplora.test/api").unwrap();
        (EsploraClient::new(mock.clone(), base), mock)
    }

    #[tokio::test]
    async fn confirmed_transaction_maps_fields() {
        let (btc, mock) = client(
            MockTransport::builder()
                .get_json(
                    "/api/tx/abcd",
                    200,
                    json!({
                        "txid": "abcd",
                        "size": 223,
                        "fee": 1410,
                        "vin": [{ "prevout": { "scriptpubkey_address": "bc1qsender", "value": 150_001_410u64 } }],
                        "vout": [
                            { "scriptpubkey_address": null, "value": 0 },
                            { "scriptpubkey_address": "bc1qdest", "value": 100_000_000u64 },
                            { "scriptpubkey_address": "bc1qchange", "value": 50_000_000u64 }
                        ],
                        "status": { "confirmed": true, "block_height": 840_000 }
                    }),
                )
                .build(),
        );
        let result = btc.lookup("abcd").await.unwrap();
        assert_eq!(result.found, Some(true));
        assert_eq!(result.confirmed, Some(true));
        assert_eq!(result.success, Some(true));
        assert_eq!(result.block_number, Some(840_000));
        assert_eq!(result.from.as_deref(), Some("bc1qsender"));
        assert_eq!(result.to.as_deref(), Some("bc1qdest"));
        assert_eq!(result.value, Some(1.5));
        assert_eq!(result.fee, Some(0.0000141));
        assert_eq!(result.size, Some(223));
        assert_eq!(mock.seen_urls(), vec!["http://esplora.test/api/tx/abcd"]);
    }

    #[tokio::test]
    async fn mempool_transaction_is_unconfirmed() {
        let (btc, _) = client(
            MockTransport::builder()
                .get_json(
                    "/tx/",
                    200,
                    json!({
                        "vin": [],
                        "vout": [{ "scriptpubkey_address": "bc1qdest", "value": 1000 }],
                        "status": { "confirmed": false }
                    }),
                )
                .build(),
        );
        let result = btc.lookup("abcd").await.unwrap();
        assert_eq!(result.confirmed, Some(false));
        assert_eq!(result.block_number, None);
        assert_eq!(result.from, None);
    }

    #[tokio::test]
    async fn http_404_is_not_found() {
        let (btc, _) = client(
            MockTransport::builder()
                .get_text("/tx/", 404, "Transaction not found")
                .build(),
        );
        let result = btc.lookup("abcd").await.unwrap();
        assert_eq!(result, LookupResult::not_found(ChainFamily::Btc));
    }

    #[tokio::test]
    async fn other_statuses_are_indeterminate() {
        let (btc, _) = client(
            MockTransport::builder()
                .get_text("/tx/", 429, "Too many requests")
                .build(),
        );
        let err = btc.lookup("abcd").await.expect_err("429 must not be not-found");
        assert!(matches!(
            err,
            CoreError::Upstream(UpstreamError::HttpStatus { status: 429, .. })
        ));
    }
}
