//! LCD client façade.
//!
//! An `LcdClient` holds an immutable configuration and one requester, and
//! hands out the per-module query sub-objects built over that requester.

use std::fmt;
use std::sync::Arc;

use terra_core::{AccAddress, LcdClientConfig};

use crate::api::OracleApi;
use crate::requester::{ApiRequester, HttpRequester};

/// A signing key a [`Wallet`] is bound to.
///
/// Only identity is exposed here; producing signatures belongs to the key
/// implementation.
pub trait Key: Send + Sync {
    /// Raw compressed public key bytes.
    fn public_key(&self) -> &[u8];

    /// Account address derived from the public key.
    fn acc_address(&self) -> AccAddress;
}

struct Inner {
    config: LcdClientConfig,
    requester: Arc<dyn ApiRequester>,
    oracle: OracleApi,
}

/// Connection to a node running the Lite Client Daemon.
///
/// Cloning is cheap and every clone shares the same configuration,
/// requester and sub-objects.
#[derive(Clone)]
pub struct LcdClient {
    inner: Arc<Inner>,
}

impl LcdClient {
    /// Create a client issuing HTTP requests to `config.url`.
    pub fn new(config: LcdClientConfig) -> Self {
        let requester = Arc::new(HttpRequester::new(config.url.clone()));
        Self::with_requester(config, requester)
    }

    /// Create a client over a custom requester.
    pub fn with_requester(config: LcdClientConfig, requester: Arc<dyn ApiRequester>) -> Self {
        tracing::debug!("Creating LCD client for {} ({})", config.url, config.chain_id);

        let oracle = OracleApi::new(requester.clone());

        Self {
            inner: Arc::new(Inner {
                config,
                requester,
                oracle,
            }),
        }
    }

    pub fn config(&self) -> &LcdClientConfig {
        &self.inner.config
    }

    pub fn requester(&self) -> &Arc<dyn ApiRequester> {
        &self.inner.requester
    }

    /// Oracle module queries.
    pub fn oracle(&self) -> &OracleApi {
        &self.inner.oracle
    }

    /// Bind a key to this client. Has no side effects.
    pub fn wallet(&self, key: impl Key + 'static) -> Wallet {
        Wallet {
            lcd: self.clone(),
            key: Arc::new(key),
        }
    }
}

impl fmt::Debug for LcdClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LcdClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// A key paired with the client it transacts through.
#[derive(Clone)]
pub struct Wallet {
    lcd: LcdClient,
    key: Arc<dyn Key>,
}

impl Wallet {
    pub fn lcd(&self) -> &LcdClient {
        &self.lcd
    }

    pub fn key(&self) -> &dyn Key {
        self.key.as_ref()
    }

    pub fn account_address(&self) -> AccAddress {
        self.key.acc_address()
    }

    pub fn chain_id(&self) -> &str {
        &self.lcd.config().chain_id
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.account_address())
            .field("chain_id", &self.chain_id())
            .finish()
    }
}
