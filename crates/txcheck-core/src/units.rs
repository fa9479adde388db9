//! Base-unit to display-unit conversion and small numeric decoders shared by
//! the chain handlers.

use alloy_primitives::U256;
use bitcoin::Amount;

use crate::error::CoreError;

pub const WEI_DECIMALS: u32 = 18;
pub const DROP_DECIMALS: u32 = 6;
pub const LAMPORT_DECIMALS: u32 = 9;
pub const SUN_DECIMALS: u32 = 6;
pub const NANOTON_DECIMALS: u32 = 9;

/// Convert an integer amount of base units into display units.
pub fn from_base_units(amount: u128, decimals: u32) -> f64 {
    amount as f64 / 10f64.powi(decimals as i32)
}

/// Satoshi to coin. Litecoin and Dogecoin share the 8-decimal base unit.
pub fn sats_to_coin(sats: u64) -> f64 {
    Amount::from_sat(sats).to_btc()
}

/// Decode an EVM quantity (`0x`-prefixed hex, arbitrary width) in wei and
/// convert it to ether-style display units.
pub fn wei_hex_to_display(value: &str) -> Result<f64, CoreError> {
    let wei = parse_hex_u256(value)?;
    let decimal = wei.to_string();
    let as_float: f64 = decimal
        .parse()
        .map_err(|e| CoreError::invalid_response(format!("wei value `{value}` not representable: {e}")))?;
    Ok(as_float / 10f64.powi(WEI_DECIMALS as i32))
}

pub fn parse_hex_u256(value: &str) -> Result<U256, CoreError> {
    let digits = strip_hex_prefix(value);
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| CoreError::invalid_response(format!("invalid hex quantity `{value}`: {e}")))
}

pub fn parse_hex_u64(value: &str) -> Result<u64, CoreError> {
    let digits = strip_hex_prefix(value);
    u64::from_str_radix(digits, 16)
        .map_err(|e| CoreError::invalid_response(format!("invalid hex quantity `{value}`: {e}")))
}

fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Read an unsigned integer that upstream APIs variously encode as a JSON
/// number or a decimal string.
pub fn json_u128(value: Option<&serde_json::Value>) -> Option<u128> {
    match value? {
        serde_json::Value::Number(n) => n.as_u64().map(u128::from),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn json_u64(value: Option<&serde_json::Value>) -> Option<u64> {
    json_u128(value).and_then(|n| u64::try_from(n).ok())
}
