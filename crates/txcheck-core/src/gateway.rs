//! The lookup gateway: one handler per chain family, dispatched on the
//! request's network.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

use crate::chains::{
    BlockchairClient, ChainLookup, EsploraClient, EvmClient, SolanaClient, TonClient, TronClient,
    UtxoChain, XrpClient,
};
use crate::error::CoreError;
use crate::network::{ChainFamily, LookupRequest, Network};
use crate::transport::{HttpTransport, Transport};
use crate::types::LookupResult;

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

// ==============================================================================
// Endpoint Configuration
// ==============================================================================

/// Upstream API base URLs. These are operator infrastructure choices, not
/// protocol constants, so every one can be overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub eth_rpc: String,
    pub bsc_rpc: String,
    pub btc_api: String,
    pub blockchair_api: String,
    pub xrp_rpc: String,
    pub sol_rpc: String,
    pub tron_api: String,
    pub ton_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            eth_rpc: "https://eth.llamarpc.com".into(),
            bsc_rpc: "https://bsc-dataseed.binance.org".into(),
            btc_api: "https://mempool.space/api".into(),
            blockchair_api: "https://api.blockchair.com".into(),
            xrp_rpc: "https://s1.ripple.com:51234".into(),
            sol_rpc: "https://api.mainnet-beta.solana.com".into(),
            tron_api: "https://api.trongrid.io".into(),
            ton_api: "https://toncenter.com/api/v3".into(),
        }
    }
}

fn parse_endpoint(name: &str, raw: &str) -> Result<Url, CoreError> {
    let parsed = Url::parse(raw).map_err(|e| {
        CoreError::InvalidConfig(format!("invalid {name} `{raw}`: expected HTTP(S) URL ({e})"))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(CoreError::InvalidConfig(format!(
            "unsupported {name} scheme `{other}`; expected http or https"
        ))),
    }
}

// ==============================================================================
// Lookup Capability
// ==============================================================================

/// What the HTTP surface and the terminal client depend on.
#[async_trait]
pub trait TxLookup: Send + Sync {
    /// Look up one validated request. Upstream failures come back as
    /// `Err(CoreError::Upstream)`; see [`indeterminate_result`] for the
    /// result shape callers should present.
    async fn lookup(&self, request: &LookupRequest) -> Result<LookupResult, CoreError>;
}

/// Fold an upstream failure into the terminal "check the explorer manually"
/// result.
pub fn indeterminate_result(network: Network, err: &CoreError) -> LookupResult {
    LookupResult::indeterminate(
        network.family(),
        format!("API error - check explorer manually ({err})"),
    )
}

// ==============================================================================
// Gateway
// ==============================================================================

pub struct Gateway {
    eth: EvmClient,
    bsc: EvmClient,
    btc: EsploraClient,
    ltc: BlockchairClient,
    doge: BlockchairClient,
    xrp: XrpClient,
    sol: SolanaClient,
    tron: TronClient,
    ton: TonClient,
}

impl Gateway {
    /// Build a gateway over real HTTP with the given per-call timeout.
    pub fn new(endpoints: &Endpoints, timeout: Duration) -> Result<Self, CoreError> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(timeout)?);
        Self::with_transport(endpoints, transport)
    }

    pub fn with_transport(
        endpoints: &Endpoints,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        let blockchair = parse_endpoint("blockchair api url", &endpoints.blockchair_api)?;
        Ok(Self {
            eth: EvmClient::new(
                transport.clone(),
                parse_endpoint("eth rpc url", &endpoints.eth_rpc)?,
            ),
            bsc: EvmClient::new(
                transport.clone(),
                parse_endpoint("bsc rpc url", &endpoints.bsc_rpc)?,
            ),
            btc: EsploraClient::new(
                transport.clone(),
                parse_endpoint("btc api url", &endpoints.btc_api)?,
            ),
            ltc: BlockchairClient::new(transport.clone(), blockchair.clone(), UtxoChain::Litecoin),
            doge: BlockchairClient::new(transport.clone(), blockchair, UtxoChain::Dogecoin),
            xrp: XrpClient::new(
                transport.clone(),
                parse_endpoint("xrp rpc url", &endpoints.xrp_rpc)?,
            ),
            sol: SolanaClient::new(
                transport.clone(),
                parse_endpoint("sol rpc url", &endpoints.sol_rpc)?,
            ),
            tron: TronClient::new(
                transport.clone(),
                parse_endpoint("tron api url", &endpoints.tron_api)?,
            ),
            ton: TonClient::new(transport, parse_endpoint("ton api url", &endpoints.ton_api)?),
        })
    }

    fn handler(&self, network: Network) -> &dyn ChainLookup {
        match network.family() {
            ChainFamily::Evm => match network {
                Network::Bsc | Network::Bep20 => &self.bsc,
                _ => &self.eth,
            },
            ChainFamily::Btc => &self.btc,
            ChainFamily::Utxo => match UtxoChain::for_network(network) {
                Some(UtxoChain::Dogecoin) => &self.doge,
                _ => &self.ltc,
            },
            ChainFamily::Xrp => &self.xrp,
            ChainFamily::Solana => &self.sol,
            ChainFamily::Tron => &self.tron,
            ChainFamily::Ton => &self.ton,
        }
    }
}

#[async_trait]
impl TxLookup for Gateway {
    async fn lookup(&self, request: &LookupRequest) -> Result<LookupResult, CoreError> {
        debug!(network = %request.network, tx_hash = %request.tx_hash, "lookup");
        let outcome = self.handler(request.network).lookup(&request.tx_hash).await;
        match &outcome {
            Ok(result) => debug!(
                network = %request.network,
                found = ?result.found,
                confirmed = ?result.confirmed,
                "lookup finished"
            ),
            Err(err) => warn!(
                network = %request.network,
                tx_hash = %request.tx_hash,
                error = %err,
                "lookup indeterminate"
            ),
        }
        outcome
    }
}
