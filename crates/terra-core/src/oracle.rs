//! Oracle module data types.
//!
//! Validators periodically submit a prevote (a hash commitment) followed by a
//! vote revealing the exchange rates of LUNA in each whitelisted denomination.

use serde::{Deserialize, Serialize};

use crate::address::ValAddress;
use crate::serializers;
use crate::types::{Dec, Denom};

/// A validator's exchange rate vote for a single denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateVote {
    pub exchange_rate: Dec,
    pub denom: Denom,
    pub voter: ValAddress,
}

/// A validator's hash commitment for a single denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRatePrevote {
    pub hash: String,
    pub denom: Denom,
    pub voter: ValAddress,
    #[serde(with = "serializers::from_str")]
    pub submit_block: u64,
}

/// A validator's hash commitment covering every denomination at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateExchangeRatePrevote {
    pub hash: String,
    pub voter: ValAddress,
    #[serde(with = "serializers::from_str")]
    pub submit_block: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateTuple {
    pub denom: Denom,
    pub exchange_rate: Dec,
}

/// A validator's revealed exchange rates for every denomination at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateExchangeRateVote {
    pub exchange_rate_tuples: Vec<ExchangeRateTuple>,
    pub voter: ValAddress,
}

/// Whitelist entry of columbus-4 and later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    pub name: Denom,
    pub tobin_tax: Dec,
}

/// Denominations that must be voted on.
///
/// The response shape changed across chain versions and both are kept as-is:
/// columbus-3 reports bare denominations, columbus-4 and later report
/// `{name, tobin_tax}` records. Encoding reproduces the shape that was decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OracleWhitelist {
    Denoms(Vec<Denom>),
    Entries(Vec<WhitelistEntry>),
}

impl OracleWhitelist {
    /// Names of the whitelisted denominations, whichever shape was reported.
    pub fn denoms(&self) -> Vec<&Denom> {
        match self {
            OracleWhitelist::Denoms(denoms) => denoms.iter().collect(),
            OracleWhitelist::Entries(entries) => entries.iter().map(|e| &e.name).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OracleWhitelist::Denoms(denoms) => denoms.len(),
            OracleWhitelist::Entries(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Current parameters of the oracle module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleParams {
    /// Blocks per voting period.
    #[serde(with = "serializers::from_str")]
    pub vote_period: u64,
    /// Ratio of voting power needed for a denomination to be active.
    pub vote_threshold: Dec,
    /// Band around the weighted median inside which voters are rewarded.
    pub reward_band: Dec,
    #[serde(with = "serializers::from_str")]
    pub reward_distribution_window: u64,
    pub whitelist: OracleWhitelist,
    /// Fraction of stake slashed once per slash window.
    pub slash_fraction: Dec,
    #[serde(with = "serializers::from_str")]
    pub slash_window: u64,
    /// Minimum ratio of valid votes per slash window.
    pub min_valid_per_window: Dec,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const COLUMBUS_3_WHITELIST: &str = r#"["ukrw","usdr","uusd","umnt"]"#;
    const COLUMBUS_4_WHITELIST: &str = r#"[{"name":"ukrw","tobin_tax":"0.002500000000000000"},{"name":"usdr","tobin_tax":"0.002500000000000000"},{"name":"umnt","tobin_tax":"0.020000000000000000"}]"#;

    #[test]
    fn test_whitelist_denoms_shape() {
        let whitelist: OracleWhitelist = serde_json::from_str(COLUMBUS_3_WHITELIST).unwrap();
        let OracleWhitelist::Denoms(denoms) = &whitelist else {
            panic!("expected bare denominations, got {whitelist:?}");
        };
        assert_eq!(denoms, &["ukrw", "usdr", "uusd", "umnt"]);
        assert_eq!(
            serde_json::to_string(&whitelist).unwrap(),
            COLUMBUS_3_WHITELIST
        );
    }

    #[test]
    fn test_whitelist_entries_shape() {
        let whitelist: OracleWhitelist = serde_json::from_str(COLUMBUS_4_WHITELIST).unwrap();
        let OracleWhitelist::Entries(entries) = &whitelist else {
            panic!("expected whitelist entries, got {whitelist:?}");
        };
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].name, "umnt");
        assert_eq!(entries[2].tobin_tax, "0.02".parse().unwrap());
        assert_eq!(whitelist.denoms(), ["ukrw", "usdr", "umnt"]);
        assert_eq!(
            serde_json::to_string(&whitelist).unwrap(),
            COLUMBUS_4_WHITELIST
        );
    }

    #[test]
    fn test_whitelist_rejects_mixed_shape() {
        let mixed = r#"["ukrw",{"name":"usdr","tobin_tax":"0.0025"}]"#;
        assert!(serde_json::from_str::<OracleWhitelist>(mixed).is_err());
    }

    #[test]
    fn test_params_decode() {
        let json = format!(
            r#"{{
                "vote_period": "5",
                "vote_threshold": "0.500000000000000000",
                "reward_band": "0.020000000000000000",
                "reward_distribution_window": "432000",
                "whitelist": {COLUMBUS_4_WHITELIST},
                "slash_fraction": "0.000100000000000000",
                "slash_window": "432000",
                "min_valid_per_window": "0.050000000000000000"
            }}"#
        );
        let params: OracleParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params.vote_period, 5);
        assert_eq!(params.reward_distribution_window, 432_000);
        assert_eq!(params.vote_threshold, "0.5".parse().unwrap());
        assert_eq!(params.whitelist.len(), 3);
    }

    #[test]
    fn test_prevote_submit_block() {
        let voter = ValAddress::from_bytes(&[7; 20]).unwrap();
        let json = format!(
            r#"{{"hash":"abcd","denom":"ukrw","voter":"{voter}","submit_block":"1024"}}"#
        );
        let prevote: ExchangeRatePrevote = serde_json::from_str(&json).unwrap();
        assert_eq!(prevote.submit_block, 1024);
        assert_eq!(prevote.voter, voter);
        assert_eq!(serde_json::to_string(&prevote).unwrap(), json);
    }

    fn denom_strategy() -> impl Strategy<Value = String> {
        "u[a-z]{2,5}"
    }

    fn tax_strategy() -> impl Strategy<Value = String> {
        (1u32..1_000_000).prop_map(|n| format!("0.{n:06}000000000000"))
    }

    proptest! {
        #[test]
        fn prop_denoms_shape_round_trip(denoms in prop::collection::vec(denom_strategy(), 1..8)) {
            let input = serde_json::to_string(&denoms).unwrap();
            let parsed: OracleWhitelist = serde_json::from_str(&input).unwrap();
            prop_assert!(matches!(parsed, OracleWhitelist::Denoms(_)));
            prop_assert_eq!(serde_json::to_string(&parsed).unwrap(), input);
        }

        #[test]
        fn prop_entries_shape_round_trip(
            entries in prop::collection::vec((denom_strategy(), tax_strategy()), 1..8)
        ) {
            let input = serde_json::to_string(
                &entries
                    .iter()
                    .map(|(name, tax)| serde_json::json!({ "name": name, "tobin_tax": tax }))
                    .collect::<Vec<_>>(),
            )
            .unwrap();
            let parsed: OracleWhitelist = serde_json::from_str(&input).unwrap();
            prop_assert!(matches!(parsed, OracleWhitelist::Entries(_)));
            prop_assert_eq!(serde_json::to_string(&parsed).unwrap(), input);
        }
    }
}
