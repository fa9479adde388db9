//! Per-chain-family lookup handlers.
//!
//! Each handler turns one transaction hash into a [`LookupResult`] by talking
//! to a single upstream API through a [`Transport`](crate::transport::Transport).
//! Handlers return `LookupResult::not_found` when the upstream definitively
//! reports absence and `Err(CoreError::Upstream)` for everything ambiguous.

mod blockchair;
mod esplora;
mod evm;
mod jsonrpc;
mod solana;
mod ton;
mod tron;
mod xrp;

pub use blockchair::{BlockchairClient, UtxoChain};
pub use esplora::EsploraClient;
pub use evm::EvmClient;
pub use solana::SolanaClient;
pub use ton::TonClient;
pub use tron::TronClient;
pub use xrp::XrpClient;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::CoreError;
use crate::types::LookupResult;

/// The one capability every chain family provides.
#[async_trait]
pub trait ChainLookup: Send + Sync {
    async fn lookup(&self, tx_hash: &str) -> Result<LookupResult, CoreError>;
}

/// Append path segments to a configured base URL. Segments are
/// percent-encoded, so an operator-pasted hash cannot alter the path.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, CoreError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| CoreError::InvalidConfig(format!("`{base}` cannot be used as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn json_str(value: Option<&serde_json::Value>) -> Option<String> {
    value
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
