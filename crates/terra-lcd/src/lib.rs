//! Client for the REST query server (LCD) exposed by a Terra node.

pub mod api;
pub mod client;
pub mod error;
pub mod requester;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::OracleApi;
pub use client::{Key, LcdClient, Wallet};
pub use error::LcdError;
pub use requester::{ApiRequester, HttpRequester, LcdResponse};
