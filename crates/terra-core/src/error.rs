//! Error types for domain value parsing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid decimal '{0}'")]
    InvalidDecimal(String),

    #[error("Invalid coin '{0}'")]
    InvalidCoin(String),

    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    #[error("Invalid address prefix: expected '{expected}', got '{found}'")]
    InvalidAddressPrefix { expected: &'static str, found: String },
}
