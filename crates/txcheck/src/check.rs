use std::time::Duration;

use eyre::{eyre, WrapErr};
use reqwest::{StatusCode, Url};

use txcheck_core::client::ClientState;
use txcheck_core::gateway::indeterminate_result;
use txcheck_core::{CoreError, Gateway, LookupRequest, LookupResult, Network, TxLookup};

// ==============================================================================
// Lookup Backend
// ==============================================================================

/// Where the terminal client sends its lookup: straight to the chain APIs,
/// or through a running gateway.
pub enum Backend {
    Local(Gateway),
    Remote { http: reqwest::Client, base: Url },
}

impl Backend {
    pub fn remote(gateway_url: &str, timeout: Duration) -> eyre::Result<Self> {
        if timeout.is_zero() {
            return Err(eyre!("upstream timeout must be greater than zero"));
        }
        let base = Url::parse(gateway_url)
            .wrap_err_with(|| format!("invalid gateway url `{gateway_url}`"))?;
        if base.cannot_be_a_base() {
            return Err(eyre!("gateway url `{gateway_url}` cannot carry a path"));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .wrap_err("build gateway HTTP client")?;
        Ok(Self::Remote { http, base })
    }

    async fn fetch(&self, request: &LookupRequest) -> eyre::Result<LookupResult> {
        match self {
            Self::Local(gateway) => match gateway.lookup(request).await {
                Ok(result) => Ok(result),
                Err(err @ CoreError::Upstream(_)) => {
                    Ok(indeterminate_result(request.network, &err))
                }
                Err(err) => Err(err.into()),
            },
            Self::Remote { http, base } => {
                let url = lookup_url(base, request)?;
                tracing::debug!(%url, "querying gateway");
                match fetch_reply(http, url).await {
                    Ok((status, body)) => decode_gateway_reply(request.network, status, &body),
                    Err(err) => Ok(LookupResult::indeterminate(
                        request.network.family(),
                        format!("gateway unreachable - check explorer manually ({err})"),
                    )),
                }
            }
        }
    }
}

async fn fetch_reply(
    http: &reqwest::Client,
    url: Url,
) -> Result<(StatusCode, String), reqwest::Error> {
    let response = http.get(url).send().await?;
    let status = response.status();
    Ok((status, response.text().await?))
}

fn lookup_url(base: &Url, request: &LookupRequest) -> eyre::Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| eyre!("gateway url `{base}` cannot carry a path"))?
        .pop_if_empty()
        .push("lookup");
    url.query_pairs_mut()
        .append_pair("txHash", &request.tx_hash)
        .append_pair("network", request.network.as_str());
    Ok(url)
}

/// 200 and 502 both carry a result record; anything else is the gateway
/// rejecting the request.
fn decode_gateway_reply(
    network: Network,
    status: StatusCode,
    body: &str,
) -> eyre::Result<LookupResult> {
    if status.is_success() || status == StatusCode::BAD_GATEWAY {
        return serde_json::from_str(body)
            .wrap_err_with(|| format!("decode gateway reply (HTTP {status})"));
    }
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned());
    if status.is_client_error() {
        return Err(eyre!("gateway rejected lookup: {message}"));
    }
    Ok(LookupResult::indeterminate(
        network.family(),
        format!("gateway error {status} - check explorer manually ({message})"),
    ))
}

// ==============================================================================
// Terminal Client
// ==============================================================================

pub async fn run(
    backend: &Backend,
    coin: &str,
    network: Option<&str>,
    tx_hash: &str,
) -> eyre::Result<()> {
    let mut state = ClientState::default().select_coin(coin)?;
    if let Some(network) = network {
        state = state.select_network(network.parse()?)?;
    }
    let (state, request) = state.enter_hash(tx_hash).begin_lookup()?;

    let selected = state.network();
    println!();
    println!("  {} on {}", state.coin().full_name, selected.name);
    println!("  TXID: {}", request.tx_hash);
    println!();

    let result = backend.fetch(&request).await?;
    let state = state.finish_lookup(result);
    for line in state.render() {
        println!("  {line}");
    }
    println!();
    Ok(())
}
