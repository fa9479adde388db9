use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::CoreError;
use crate::network::ChainFamily;
use crate::transport::Transport;
use crate::types::LookupResult;
use crate::units::{from_base_units, json_u128, json_u64, NANOTON_DECIMALS};

use super::{endpoint, json_str, ChainLookup};

/// toncenter v3 indexer.
///
/// The indexer only serves transactions from finalized masterchain blocks,
/// so any returned record counts as confirmed. That holds for toncenter's
/// `/transactions` endpoint; pending-message endpoints are not consulted.
pub struct TonClient {
    transport: Arc<dyn Transport>,
    base: Url,
}

impl TonClient {
    pub fn new(transport: Arc<dyn Transport>, base: Url) -> Self {
        Self { transport, base }
    }
}

#[async_trait]
impl ChainLookup for TonClient {
    async fn lookup(&self, tx_hash: &str) -> Result<LookupResult, CoreError> {
        let mut url = endpoint(&self.base, &["transactions"])?;
        url.query_pairs_mut()
            .append_pair("hash", tx_hash)
            .append_pair("limit", "1");

        let body = self.transport.get(&url).await?.into_json()?;
        let transactions = body
            .get("transactions")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| CoreError::invalid_response("missing `transactions` array"))?;
        let Some(tx) = transactions.first() else {
            return Ok(LookupResult::not_found(ChainFamily::Ton));
        };

        let in_msg = tx.get("in_msg");

        let mut result = LookupResult::found(ChainFamily::Ton);
        result.confirmed = Some(true);
        result.success = Some(!has_failure_flag(tx));
        result.from = json_str(in_msg.and_then(|m| m.get("source")));
        result.to = json_str(in_msg.and_then(|m| m.get("destination")))
            .or_else(|| json_str(tx.get("account")));
        result.value = json_u128(in_msg.and_then(|m| m.get("value")))
            .map(|nano| from_base_units(nano, NANOTON_DECIMALS));
        result.block_number = json_u64(tx.get("mc_block_seqno"));
        result.fee = json_u128(tx.get("total_fees"))
            .map(|nano| from_base_units(nano, NANOTON_DECIMALS));
        Ok(result)
    }
}

/// Success unless the description explicitly says otherwise.
fn has_failure_flag(tx: &serde_json::Value) -> bool {
    let flag = |pointer: &str| tx.pointer(pointer).and_then(serde_json::Value::as_bool);
    flag("/description/aborted") == Some(true)
        || flag("/description/compute_ph/success") == Some(false)
        || flag("/description/action/success") == Some(false)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::UpstreamError;
    use crate::transport::mock::MockTransport;

    fn client(mock: MockTransport) -> (TonClient, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let base = Url::parse("http://toncenter.test/api/v3").unwrap();
        (TonClient::new(mock.clone(), base), mock)
    }

    #[tokio::test]
    async fn returned_record_is_confirmed_and_successful() {
        let (ton, mock) = client(
            MockTransport::builder()
                .get_json(
                    "/api/v3/transactions",
                    200,
                    json!({ "transactions": [{
                        "hash": "abc=",
                        "account": "0:DEST",
                        "mc_block_seqno": 41_000_000u64,
                        "total_fees": "2500000",
                        "in_msg": { "source": "0:SRC", "destination": "0:DEST", "value": "1500000000" },
                        "description": { "aborted": false, "compute_ph": { "success": true } }
                    }] }),
                )
                .build(),
        );
        let result = ton.lookup("abc=").await.unwrap();
        assert_eq!(result.found, Some(true));
        assert_eq!(result.confirmed, Some(true));
        assert_eq!(result.success, Some(true));
        assert_eq!(result.from.as_deref(), Some("0:SRC"));
        assert_eq!(result.to.as_deref(), Some("0:DEST"));
        assert_eq!(result.value, Some(1.5));
        assert_eq!(result.fee, Some(0.0025));
        assert_eq!(result.block_number, Some(41_000_000));
        assert_eq!(
            mock.seen_urls(),
            vec!["http://toncenter.test/api/v3/transactions?hash=abc%3D&limit=1"]
        );
    }

    #[tokio::test]
    async fn aborted_transaction_is_failed() {
        let (ton, _) = client(
            MockTransport::builder()
                .get_json(
                    "/transactions",
                    200,
                    json!({ "transactions": [{ "description": { "aborted": true } }] }),
                )
                .build(),
        );
        let result = ton.lookup("abc").await.unwrap();
        assert_eq!(result.confirmed, Some(true));
        assert_eq!(result.success, Some(false));
    }

    #[tokio::test]
    async fn missing_description_defaults_to_success() {
        let (ton, _) = client(
            MockTransport::builder()
                .get_json("/transactions", 200, json!({ "transactions": [{ "lt": "1" }] }))
                .build(),
        );
        assert_eq!(ton.lookup("abc").await.unwrap().success, Some(true));
    }

    #[tokio::test]
    async fn empty_list_is_not_found() {
        let (ton, _) = client(
            MockTransport::builder()
                .get_json("/transactions", 200, json!({ "transactions": [], "address_book": {} }))
                .build(),
        );
        assert_eq!(
            ton.lookup("abc").await.unwrap(),
            LookupResult::not_found(ChainFamily::Ton)
        );
    }

    #[tokio::test]
    async fn timeout_is_upstream_error() {
        let (ton, _) = client(MockTransport::builder().timeout_all().build());
        let err = ton.lookup("abc").await.expect_err("timeout must surface");
        assert!(matches!(err, CoreError::Upstream(UpstreamError::Timeout)));
    }
}
