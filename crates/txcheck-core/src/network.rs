//! Supported network identifiers and their chain families.
//!
//! The set is closed: every [`Network`] maps to exactly one [`ChainFamily`],
//! and anything outside it is rejected as caller input before an upstream
//! API is touched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ==============================================================================
// Network
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Eth,
    Bsc,
    Erc20,
    Bep20,
    Btc,
    Ltc,
    Doge,
    Xrp,
    Sol,
    Trx,
    Trc20,
    Ton,
}

impl Network {
    pub const ALL: [Network; 12] = [
        Network::Eth,
        Network::Bsc,
        Network::Erc20,
        Network::Bep20,
        Network::Btc,
        Network::Ltc,
        Network::Doge,
        Network::Xrp,
        Network::Sol,
        Network::Trx,
        Network::Trc20,
        Network::Ton,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eth => "eth",
            Self::Bsc => "bsc",
            Self::Erc20 => "erc20",
            Self::Bep20 => "bep20",
            Self::Btc => "btc",
            Self::Ltc => "ltc",
            Self::Doge => "doge",
            Self::Xrp => "xrp",
            Self::Sol => "sol",
            Self::Trx => "trx",
            Self::Trc20 => "trc20",
            Self::Ton => "ton",
        }
    }

    pub fn family(self) -> ChainFamily {
        match self {
            Self::Eth | Self::Erc20 | Self::Bsc | Self::Bep20 => ChainFamily::Evm,
            Self::Btc => ChainFamily::Btc,
            Self::Ltc | Self::Doge => ChainFamily::Utxo,
            Self::Xrp => ChainFamily::Xrp,
            Self::Sol => ChainFamily::Solana,
            Self::Trx | Self::Trc20 => ChainFamily::Tron,
            Self::Ton => ChainFamily::Ton,
        }
    }

    /// Symbol of the chain's own coin. Lookup values and fees are always
    /// denominated in it, token networks included.
    pub fn native_symbol(self) -> &'static str {
        match self {
            Self::Eth | Self::Erc20 => "ETH",
            Self::Bsc | Self::Bep20 => "BNB",
            Self::Btc => "BTC",
            Self::Ltc => "LTC",
            Self::Doge => "DOGE",
            Self::Xrp => "XRP",
            Self::Sol => "SOL",
            Self::Trx | Self::Trc20 => "TRX",
            Self::Ton => "TON",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|n| n.as_str() == wanted)
            .ok_or_else(|| CoreError::InvalidInput(format!("unsupported network `{}`", s.trim())))
    }
}

// ==============================================================================
// Chain Family
// ==============================================================================

/// Upstream API family a network is served by. Also the `networkType` tag
/// carried on every lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainFamily {
    Evm,
    Btc,
    Utxo,
    Xrp,
    Solana,
    Tron,
    Ton,
}

impl ChainFamily {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Evm => "evm",
            Self::Btc => "btc",
            Self::Utxo => "utxo",
            Self::Xrp => "xrp",
            Self::Solana => "sol",
            Self::Tron => "tron",
            Self::Ton => "ton",
        }
    }
}

// ==============================================================================
// Lookup Request
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub tx_hash: String,
    pub network: Network,
}

impl LookupRequest {
    /// Validate raw caller input. Missing or blank fields and unknown
    /// networks are rejected here so no upstream call is ever made for them.
    pub fn parse(tx_hash: Option<&str>, network: Option<&str>) -> Result<Self, CoreError> {
        let tx_hash = tx_hash.map(str::trim).unwrap_or_default();
        let network = network.map(str::trim).unwrap_or_default();
        if tx_hash.is_empty() || network.is_empty() {
            return Err(CoreError::InvalidInput(
                "missing txHash or network parameter".to_owned(),
            ));
        }

        Ok(Self {
            tx_hash: tx_hash.to_owned(),
            network: network.parse()?,
        })
    }
}
