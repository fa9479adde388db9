use std::env;
use std::sync::Once;

use txcheck_core::gateway::DEFAULT_UPSTREAM_TIMEOUT;
use txcheck_core::{Endpoints, Gateway, LookupRequest, TxLookup};

static INIT_TRACING: Once = Once::new();

fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("txcheck_core=debug")),
            )
            .with_target(true)
            .try_init();
    });
}

fn gateway() -> Gateway {
    init_tracing();
    Gateway::new(&Endpoints::default(), DEFAULT_UPSTREAM_TIMEOUT)
        .expect("default endpoints must build a gateway")
}

/// Reads `TXCHECK_LIVE_<NETWORK>_TXID`, e.g. `TXCHECK_LIVE_ETH_TXID`.
fn live_txid(network: &str) -> String {
    let var = format!("TXCHECK_LIVE_{}_TXID", network.to_ascii_uppercase());
    env::var(&var).unwrap_or_else(|_| panic!("{var} must be set"))
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "hits public endpoints; set TXCHECK_LIVE_<NETWORK>_TXID for each network"]
async fn live_known_transactions_are_found_and_stable() {
    let gateway = gateway();
    for network in ["eth", "bsc", "btc", "ltc", "doge", "xrp", "sol", "trx", "ton"] {
        let request = LookupRequest::parse(Some(live_txid(network).as_str()), Some(network))
            .expect("live request must parse");

        let first = gateway
            .lookup(&request)
            .await
            .unwrap_or_else(|e| panic!("{network} lookup failed: {e}"));
        assert_eq!(first.found, Some(true), "{network} must be found");

        let second = gateway
            .lookup(&request)
            .await
            .unwrap_or_else(|e| panic!("{network} repeat lookup failed: {e}"));
        assert_eq!(first.confirmed, second.confirmed, "{network}");
        assert_eq!(first.success, second.success, "{network}");
        assert_eq!(first.from, second.from, "{network}");
        assert_eq!(first.to, second.to, "{network}");
        assert_eq!(first.value, second.value, "{network}");
    }
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "hits public endpoints"]
async fn live_unknown_evm_hash_is_not_found() {
    let request = LookupRequest::parse(
        Some("0x0000000000000000000000000000000000000000000000000000000000000001"),
        Some("eth"),
    )
    .expect("request must parse");
    let result = gateway().lookup(&request).await.expect("lookup must succeed");
    assert_eq!(result.found, Some(false));
}
