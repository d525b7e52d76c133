//! Outbound request messages.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use terra_core::{Coins, Dec, LcdClientConfig};

/// Identifier correlating a request with its reply event.
///
/// Generated ids are numbers; callers using [`crate::Extension::send`]
/// directly may use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(u64),
    Text(String),
}

impl RequestId {
    pub fn as_number(&self) -> Option<u64> {
        match self {
            RequestId::Number(n) => Some(*n),
            RequestId::Text(_) => None,
        }
    }
}

impl From<u64> for RequestId {
    fn from(value: u64) -> Self {
        RequestId::Number(value)
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        RequestId::Text(value)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        RequestId::Text(value.to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{n}"),
            RequestId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendType {
    Connect,
    Post,
    Sign,
}

impl fmt::Display for SendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendType::Connect => write!(f, "connect"),
            SendType::Post => write!(f, "post"),
            SendType::Sign => write!(f, "sign"),
        }
    }
}

/// A message to the extension: `{id, type, ...payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendData {
    pub id: RequestId,
    #[serde(rename = "type")]
    pub kind: SendType,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl SendData {
    pub fn new(id: impl Into<RequestId>, kind: SendType) -> Self {
        Self {
            id: id.into(),
            kind,
            payload: Map::new(),
        }
    }

    pub fn with_payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload = payload;
        self
    }
}

/// Transaction to be signed, or signed and broadcast, by the extension.
///
/// Messages and fee are passed through as already-encoded JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TxOptions {
    pub msgs: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Sent as a coin list string, e.g. `0.015uluna,0.1ukrw`.
    #[serde(
        rename = "gasPrices",
        serialize_with = "serialize_coins_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_prices: Option<Coins>,
    #[serde(rename = "gasAdjustment", skip_serializing_if = "Option::is_none")]
    pub gas_adjustment: Option<Dec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
    /// Node the extension should broadcast through, for `post`.
    #[serde(rename = "lcdClientConfig", skip_serializing_if = "Option::is_none")]
    pub lcd_client_config: Option<LcdClientConfig>,
}

impl TxOptions {
    pub fn new(msgs: Vec<Value>) -> Self {
        Self {
            msgs,
            ..Default::default()
        }
    }
}

fn serialize_coins_string<S: Serializer>(
    coins: &Option<Coins>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match coins {
        Some(coins) => serializer.collect_str(coins),
        None => serializer.serialize_none(),
    }
}
