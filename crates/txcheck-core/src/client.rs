//! Operator-facing presentation state.
//!
//! [`ClientState`] is an immutable record: every transition consumes the
//! current state and returns the next one, so the selected network can never
//! drift out of sync with the selected coin.

use crate::catalog::{explorer_url, find_coin, Coin, NetworkOption, COINS};
use crate::error::CoreError;
use crate::network::{LookupRequest, Network};
use crate::types::LookupResult;

pub const LEDGER_REMINDER: &str = "On-chain confirmation does not prove the deposit was credited. \
Check the user's transaction page in the admin panel.";
pub const NOT_FOUND_HINT: &str = "Double-check the TXID and selected network.";
pub const EXPLORER_HINT: &str = "Open the explorer to view full transaction details.";

// ==============================================================================
// Client State
// ==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ClientState {
    coin: &'static Coin,
    network: Network,
    tx_hash: String,
    in_flight: bool,
    last_result: Option<LookupResult>,
}

impl Default for ClientState {
    fn default() -> Self {
        let coin = &COINS[0];
        Self {
            coin,
            network: coin.default_network().id,
            tx_hash: String::new(),
            in_flight: false,
            last_result: None,
        }
    }
}

impl ClientState {
    pub fn coin(&self) -> &'static Coin {
        self.coin
    }

    pub fn network(&self) -> &'static NetworkOption {
        self.coin
            .network(self.network)
            .unwrap_or_else(|| self.coin.default_network())
    }

    pub fn tx_hash(&self) -> &str {
        &self.tx_hash
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn last_result(&self) -> Option<&LookupResult> {
        self.last_result.as_ref()
    }

    pub fn explorer_url(&self) -> Option<String> {
        explorer_url(self.network(), &self.tx_hash)
    }

    /// Switch currency. The network resets to the coin's first network and
    /// any previous result is discarded.
    pub fn select_coin(self, coin_id: &str) -> Result<Self, CoreError> {
        let coin = find_coin(coin_id)
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown currency `{coin_id}`")))?;
        Ok(Self {
            coin,
            network: coin.default_network().id,
            last_result: None,
            ..self
        })
    }

    pub fn select_network(self, network: Network) -> Result<Self, CoreError> {
        if self.coin.network(network).is_none() {
            return Err(CoreError::InvalidInput(format!(
                "{} is not offered on network `{network}`",
                self.coin.name
            )));
        }
        Ok(Self {
            network,
            last_result: None,
            ..self
        })
    }

    pub fn enter_hash(self, tx_hash: &str) -> Self {
        Self {
            tx_hash: tx_hash.trim().to_owned(),
            ..self
        }
    }

    /// Start a lookup. Refused while one is already outstanding or when no
    /// hash has been entered.
    pub fn begin_lookup(self) -> Result<(Self, LookupRequest), CoreError> {
        if self.in_flight {
            return Err(CoreError::InvalidInput("a lookup is already in progress".to_owned()));
        }
        let request =
            LookupRequest::parse(Some(self.tx_hash.as_str()), Some(self.network().id.as_str()))?;
        let next = Self {
            in_flight: true,
            last_result: None,
            ..self
        };
        Ok((next, request))
    }

    pub fn finish_lookup(self, result: LookupResult) -> Self {
        Self {
            in_flight: false,
            last_result: Some(result),
            ..self
        }
    }

    pub fn view(&self) -> Option<StatusView> {
        self.last_result.as_ref().map(StatusView::from_result)
    }

    /// Human-readable lines for the last result.
    pub fn render(&self) -> Vec<String> {
        let Some(result) = &self.last_result else {
            return Vec::new();
        };
        let option = self.network();
        let mut lines = Vec::new();

        match StatusView::from_result(result) {
            StatusView::Confirmed { success } => {
                lines.push(if success { "Success" } else { "Failed" }.to_owned());
                push_details(&mut lines, result, option.id.native_symbol());
                lines.push(format!("Next step: {LEDGER_REMINDER}"));
            }
            StatusView::Pending => {
                lines.push("Pending / Unconfirmed".to_owned());
                push_details(&mut lines, result, option.id.native_symbol());
            }
            StatusView::NotFound => {
                lines.push(
                    result
                        .error
                        .clone()
                        .unwrap_or_else(|| crate::types::NOT_FOUND_MESSAGE.to_owned()),
                );
                lines.push(NOT_FOUND_HINT.to_owned());
            }
            StatusView::Indeterminate { message } => {
                lines.push(message);
                lines.push(EXPLORER_HINT.to_owned());
                lines.push(format!("Reminder: {LEDGER_REMINDER}"));
            }
        }

        if let Some(url) = self.explorer_url() {
            lines.push(format!("Explorer: {url}"));
        }
        lines
    }
}

/// Values and fees are the chain's native amounts, so they carry the native
/// symbol even when the selected option is a token.
fn push_details(lines: &mut Vec<String>, result: &LookupResult, symbol: &str) {
    if let Some(block) = result.block_number {
        lines.push(format!("Block: {block}"));
    }
    if let Some(from) = &result.from {
        lines.push(format!("From: {from}"));
    }
    if let Some(to) = &result.to {
        lines.push(format!("To: {to}"));
    }
    if let Some(value) = result.value.filter(|v| *v > 0.0) {
        lines.push(format!("Value: {value:.6} {symbol}"));
    }
    if let Some(fee) = result.fee {
        lines.push(format!("Fee: {fee} {symbol}"));
    }
    if let Some(gas) = result.gas_used {
        lines.push(format!("Gas used: {gas}"));
    }
    if let Some(size) = result.size {
        lines.push(format!("Size: {size} bytes"));
    }
}

// ==============================================================================
// Status View
// ==============================================================================

/// The single visual state a result maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView {
    Confirmed { success: bool },
    Pending,
    NotFound,
    /// Terminal fallback: send the operator to the explorer.
    Indeterminate { message: String },
}

impl StatusView {
    pub fn from_result(result: &LookupResult) -> Self {
        match result.found {
            Some(true) if result.confirmed == Some(true) => Self::Confirmed {
                success: result.success != Some(false),
            },
            Some(true) => Self::Pending,
            Some(false) => Self::NotFound,
            None => Self::Indeterminate {
                message: result
                    .error
                    .clone()
                    .unwrap_or_else(|| "Open explorer to check status".to_owned()),
            },
        }
    }
}
