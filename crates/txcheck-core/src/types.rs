//! Normalized transaction status shared by every chain family.

use serde::{Deserialize, Serialize};

use crate::network::ChainFamily;

pub const NOT_FOUND_MESSAGE: &str = "Transaction not found on blockchain";

/// Outcome of one lookup. `found` is tri-state: `Some(true)` located,
/// `Some(false)` definitively absent, `None` indeterminate.
///
/// Only [`LookupResult::found`] produces a record with populated fields;
/// not-found and indeterminate records carry nothing but the tag and a
/// message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub found: Option<bool>,
    pub confirmed: Option<bool>,
    pub success: Option<bool>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub value: Option<f64>,
    pub block_number: Option<u64>,
    pub fee: Option<f64>,
    pub gas_used: Option<u64>,
    pub size: Option<u64>,
    pub network_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LookupResult {
    fn empty(family: ChainFamily, found: Option<bool>, error: Option<String>) -> Self {
        Self {
            found,
            confirmed: None,
            success: None,
            from: None,
            to: None,
            value: None,
            block_number: None,
            fee: None,
            gas_used: None,
            size: None,
            network_type: family.tag().to_owned(),
            error,
        }
    }

    /// A located transaction; handlers fill in the remaining fields.
    pub fn found(family: ChainFamily) -> Self {
        Self::empty(family, Some(true), None)
    }

    pub fn not_found(family: ChainFamily) -> Self {
        Self::empty(family, Some(false), Some(NOT_FOUND_MESSAGE.to_owned()))
    }

    pub fn indeterminate(family: ChainFamily, message: impl Into<String>) -> Self {
        Self::empty(family, None, Some(message.into()))
    }

    pub fn is_found(&self) -> bool {
        self.found == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_has_no_populated_fields() {
        let result = LookupResult::not_found(ChainFamily::Xrp);
        assert_eq!(result.found, Some(false));
        assert_eq!(result.confirmed, None);
        assert_eq!(result.success, None);
        assert_eq!(result.from, None);
        assert_eq!(result.value, None);
        assert_eq!(result.block_number, None);
        assert_eq!(result.network_type, "xrp");
    }

    #[test]
    fn indeterminate_serializes_found_as_null() {
        let result = LookupResult::indeterminate(ChainFamily::Evm, "upstream timed out");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["found"].is_null());
        assert!(json["confirmed"].is_null());
        assert_eq!(json["networkType"], "evm");
        assert_eq!(json["error"], "upstream timed out");
    }

    #[test]
    fn found_record_uses_camel_case_keys() {
        let mut result = LookupResult::found(ChainFamily::Evm);
        result.block_number = Some(7);
        result.gas_used = Some(21_000);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["found"], true);
        assert_eq!(json["blockNumber"], 7);
        assert_eq!(json["gasUsed"], 21_000);
        assert!(json.get("error").is_none());
    }
}
