use clap::{Args, Parser, Subcommand};

use txcheck_core::gateway::DEFAULT_UPSTREAM_TIMEOUT;
use txcheck_core::Endpoints;

/// txcheck: manual deposit verification against public blockchain APIs.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(flatten)]
    pub upstream: UpstreamArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the lookup gateway HTTP server.
    Serve {
        /// Address to bind the web server to.
        #[arg(long, default_value = "127.0.0.1", env = "TXCHECK_BIND")]
        bind: String,

        /// Port to listen on.
        #[arg(long, default_value = "3090", env = "TXCHECK_PORT")]
        port: u16,
    },

    /// Look up one transaction and print its status.
    Check {
        /// Currency id (btc, eth, usdt, usdc, bnb, sol, trx, ton, ltc, doge, xrp, dai).
        #[arg(long)]
        coin: String,

        /// Network id; defaults to the currency's first network.
        #[arg(long)]
        network: Option<String>,

        /// Query a running gateway instead of calling upstream APIs directly.
        #[arg(long, env = "TXCHECK_GATEWAY_URL")]
        gateway_url: Option<String>,

        /// Transaction hash or signature.
        tx_hash: String,
    },
}

#[derive(Args)]
pub struct UpstreamArgs {
    /// Ethereum JSON-RPC URL (eth, erc20).
    #[arg(long, env = "TXCHECK_ETH_RPC_URL", default_value_t = Endpoints::default().eth_rpc)]
    pub eth_rpc_url: String,

    /// BNB Smart Chain JSON-RPC URL (bsc, bep20).
    #[arg(long, env = "TXCHECK_BSC_RPC_URL", default_value_t = Endpoints::default().bsc_rpc)]
    pub bsc_rpc_url: String,

    /// Esplora-compatible Bitcoin REST base URL.
    #[arg(long, env = "TXCHECK_BTC_API_URL", default_value_t = Endpoints::default().btc_api)]
    pub btc_api_url: String,

    /// Blockchair API base URL (ltc, doge).
    #[arg(long, env = "TXCHECK_BLOCKCHAIR_API_URL", default_value_t = Endpoints::default().blockchair_api)]
    pub blockchair_api_url: String,

    /// rippled JSON-RPC URL.
    #[arg(long, env = "TXCHECK_XRP_RPC_URL", default_value_t = Endpoints::default().xrp_rpc)]
    pub xrp_rpc_url: String,

    /// Solana JSON-RPC URL.
    #[arg(long, env = "TXCHECK_SOL_RPC_URL", default_value_t = Endpoints::default().sol_rpc)]
    pub sol_rpc_url: String,

    /// TronGrid API base URL (trx, trc20).
    #[arg(long, env = "TXCHECK_TRON_API_URL", default_value_t = Endpoints::default().tron_api)]
    pub tron_api_url: String,

    /// toncenter v3 API base URL.
    #[arg(long, env = "TXCHECK_TON_API_URL", default_value_t = Endpoints::default().ton_api)]
    pub ton_api_url: String,

    /// Timeout for each upstream HTTP call, in seconds.
    #[arg(long, env = "TXCHECK_UPSTREAM_TIMEOUT_SECS", default_value_t = DEFAULT_UPSTREAM_TIMEOUT.as_secs())]
    pub upstream_timeout_secs: u64,
}

impl UpstreamArgs {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            eth_rpc: self.eth_rpc_url.clone(),
            bsc_rpc: self.bsc_rpc_url.clone(),
            btc_api: self.btc_api_url.clone(),
            blockchair_api: self.blockchair_api_url.clone(),
            xrp_rpc: self.xrp_rpc_url.clone(),
            sol_rpc: self.sol_rpc_url.clone(),
            tron_api: self.tron_api_url.clone(),
            ton_api: self.ton_api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn endpoint_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "txcheck",
            "--ton-api-url",
            "http://ton.local/api/v3",
            "check",
            "--coin",
            "ton",
            "abc",
        ])
        .expect("arguments must parse");
        let endpoints = cli.upstream.endpoints();
        assert_eq!(endpoints.ton_api, "http://ton.local/api/v3");
        assert_eq!(endpoints.eth_rpc, Endpoints::default().eth_rpc);
        assert!(matches!(cli.command, Command::Check { ref coin, .. } if coin == "ton"));
    }
}
