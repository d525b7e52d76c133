//! LCD client configuration.

use serde::{Deserialize, Serialize};

use crate::types::{Coins, Dec};

/// Connection settings for a node running the Lite Client Daemon.
///
/// Immutable once handed to a client. Uses the field names the wallet
/// extension expects, since the config also travels inside `post` requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcdClientConfig {
    /// Base URL to which LCD requests are made.
    #[serde(rename = "URL")]
    pub url: String,
    /// Chain ID of the network, e.g. `columbus-4`.
    #[serde(rename = "chainID")]
    pub chain_id: String,
    /// Default gas prices used for fee estimation.
    #[serde(rename = "gasPrices", default, skip_serializing_if = "Option::is_none")]
    pub gas_prices: Option<Coins>,
    /// Default gas adjustment used for fee estimation.
    #[serde(rename = "gasAdjustment", default, skip_serializing_if = "Option::is_none")]
    pub gas_adjustment: Option<Dec>,
}

impl LcdClientConfig {
    pub fn new(url: impl Into<String>, chain_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            chain_id: chain_id.into(),
            gas_prices: None,
            gas_adjustment: None,
        }
    }

    pub fn with_gas_prices(mut self, gas_prices: Coins) -> Self {
        self.gas_prices = Some(gas_prices);
        self
    }

    pub fn with_gas_adjustment(mut self, gas_adjustment: Dec) -> Self {
        self.gas_adjustment = Some(gas_adjustment);
        self
    }
}
