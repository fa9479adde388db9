//! Currencies an operator can verify deposits for, and the networks each
//! one is accepted on.

use serde::Serialize;

use crate::network::Network;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOption {
    pub id: Network,
    pub name: &'static str,
    pub explorer: &'static str,
    /// Currency the deposit is made in on this network.
    pub symbol: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub id: &'static str,
    pub name: &'static str,
    pub full_name: &'static str,
    pub networks: &'static [NetworkOption],
}

impl Coin {
    pub fn network(&self, id: Network) -> Option<&'static NetworkOption> {
        self.networks.iter().find(|n| n.id == id)
    }

    pub fn default_network(&self) -> &'static NetworkOption {
        &self.networks[0]
    }
}

const MEMPOOL: &str = "https://mempool.space/tx/";
const ETHERSCAN: &str = "https://etherscan.io/tx/";
const BSCSCAN: &str = "https://bscscan.com/tx/";
const SOLSCAN: &str = "https://solscan.io/tx/";
const TRONSCAN: &str = "https://tronscan.org/#/transaction/";
const TONSCAN: &str = "https://tonscan.org/tx/";

const fn opt(
    id: Network,
    name: &'static str,
    explorer: &'static str,
    symbol: &'static str,
) -> NetworkOption {
    NetworkOption {
        id,
        name,
        explorer,
        symbol,
    }
}

pub const COINS: &[Coin] = &[
    Coin {
        id: "btc",
        name: "BTC",
        full_name: "Bitcoin",
        networks: &[opt(Network::Btc, "BTC", MEMPOOL, "BTC")],
    },
    Coin {
        id: "eth",
        name: "ETH",
        full_name: "Ethereum",
        networks: &[opt(Network::Eth, "ETH", ETHERSCAN, "ETH")],
    },
    Coin {
        id: "usdt",
        name: "USDT",
        full_name: "Tether",
        networks: &[
            opt(Network::Bep20, "BNB Smart Chain (BEP20)", BSCSCAN, "USDT"),
            opt(Network::Erc20, "Ethereum (ERC20)", ETHERSCAN, "USDT"),
            opt(Network::Sol, "Solana (SOL)", SOLSCAN, "USDT"),
            opt(Network::Trc20, "Tron (TRC20)", TRONSCAN, "USDT"),
            opt(Network::Ton, "The Open Network (TON)", TONSCAN, "USDT"),
        ],
    },
    Coin {
        id: "usdc",
        name: "USDC",
        full_name: "USD Coin",
        networks: &[
            opt(Network::Erc20, "Ethereum (ERC20)", ETHERSCAN, "USDC"),
            opt(Network::Sol, "Solana (SOL)", SOLSCAN, "USDC"),
        ],
    },
    Coin {
        id: "bnb",
        name: "BNB",
        full_name: "BNB",
        networks: &[opt(Network::Bsc, "BNB", BSCSCAN, "BNB")],
    },
    Coin {
        id: "sol",
        name: "SOL",
        full_name: "Solana",
        networks: &[opt(Network::Sol, "SOL", SOLSCAN, "SOL")],
    },
    Coin {
        id: "trx",
        name: "TRX",
        full_name: "Tron",
        networks: &[opt(Network::Trx, "TRX", TRONSCAN, "TRX")],
    },
    Coin {
        id: "ton",
        name: "TON",
        full_name: "Toncoin",
        networks: &[opt(Network::Ton, "TON", TONSCAN, "TON")],
    },
    Coin {
        id: "ltc",
        name: "LTC",
        full_name: "Litecoin",
        networks: &[opt(
            Network::Ltc,
            "LTC",
            "https://blockchair.com/litecoin/transaction/",
            "LTC",
        )],
    },
    Coin {
        id: "doge",
        name: "DOGE",
        full_name: "Dogecoin",
        networks: &[opt(
            Network::Doge,
            "DOGE",
            "https://blockchair.com/dogecoin/transaction/",
            "DOGE",
        )],
    },
    Coin {
        id: "xrp",
        name: "XRP",
        full_name: "XRP",
        networks: &[opt(Network::Xrp, "XRP", "https://xrpscan.com/tx/", "XRP")],
    },
    Coin {
        id: "dai",
        name: "DAI",
        full_name: "Dai",
        networks: &[opt(Network::Erc20, "DAI (ERC20)", ETHERSCAN, "DAI")],
    },
];

pub fn find_coin(id: &str) -> Option<&'static Coin> {
    let id = id.trim();
    COINS.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

/// Explorer link for manual inspection. Empty hash yields no link.
pub fn explorer_url(option: &NetworkOption, tx_hash: &str) -> Option<String> {
    let tx_hash = tx_hash.trim();
    (!tx_hash.is_empty()).then(|| format!("{}{}", option.explorer, tx_hash))
}
