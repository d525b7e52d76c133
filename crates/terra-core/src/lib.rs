//! Core domain types shared by the LCD client and the extension bridge.
//!
//! This crate provides:
//! - Coins and decimals as the LCD transmits them (`types` module)
//! - Bech32 account and validator addresses (`address` module)
//! - Oracle module data types (`oracle` module)
//! - LCD client configuration (`config` module)

pub mod address;
pub mod config;
pub mod error;
pub mod oracle;
pub mod serializers;
pub mod types;

pub use address::{AccAddress, ValAddress};
pub use config::LcdClientConfig;
pub use error::CoreError;
pub use oracle::{
    AggregateExchangeRatePrevote, AggregateExchangeRateVote, ExchangeRatePrevote,
    ExchangeRateTuple, ExchangeRateVote, OracleParams, OracleWhitelist, WhitelistEntry,
};
pub use types::*;
