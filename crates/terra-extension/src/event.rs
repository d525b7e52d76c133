//! Inbound reply events.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use terra_core::{AccAddress, LcdClientConfig};

use crate::error::ExtensionError;
use crate::message::RequestId;

pub const ON_CONNECT: &str = "onConnect";
pub const ON_SIGN: &str = "onSign";
pub const ON_POST: &str = "onPost";

/// Reply to `connect`: the wallet account the user connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectPayload {
    pub address: AccAddress,
}

/// Older extensions reply with the bare address, newer ones with `{address}`.
impl<'de> Deserialize<'de> for ConnectPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bare(AccAddress),
            Object { address: AccAddress },
        }

        let address = match Raw::deserialize(deserializer)? {
            Raw::Bare(address) | Raw::Object { address } => address,
        };
        Ok(ConnectPayload { address })
    }
}

/// Signature material produced by the extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignResult {
    /// Base64 encoded public key.
    pub public_key: String,
    /// Base64 encoded signature.
    pub signature: String,
    /// Recovery id.
    pub recid: u8,
    /// The signed document, to rebuild the transaction for broadcast.
    #[serde(rename = "stdSignMsgData")]
    pub std_sign_msg_data: Value,
}

impl SignResult {
    pub fn public_key_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.public_key)
    }

    pub fn signature_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.signature)
    }
}

/// Reply to `sign`. `msgs` echoes the request so concurrent signs can be told apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignPayload {
    pub id: RequestId,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub msgs: Vec<Value>,
    pub success: bool,
    #[serde(default)]
    pub result: Option<SignResult>,
}

/// Broadcast result of a `post`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResult {
    /// Error code; absent for a successful transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default)]
    pub txhash: String,
}

/// Reply to `post`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPayload {
    pub id: RequestId,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub msgs: Vec<Value>,
    #[serde(rename = "lcdClientConfig", default, skip_serializing_if = "Option::is_none")]
    pub lcd_client_config: Option<LcdClientConfig>,
    pub success: bool,
    #[serde(default)]
    pub result: Option<PostResult>,
}

/// What became of a posted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// Accepted by the node.
    Broadcast { txhash: String },
    /// Delivered, but the transaction failed.
    Failed { code: u32, raw_log: String },
    /// The extension reported no broadcast result, e.g. the user declined.
    Rejected,
}

impl PostPayload {
    pub fn outcome(&self) -> PostOutcome {
        match &self.result {
            Some(PostResult {
                code: Some(code),
                raw_log,
                ..
            }) if *code != 0 => PostOutcome::Failed {
                code: *code,
                raw_log: raw_log.clone(),
            },
            Some(result) if self.success => PostOutcome::Broadcast {
                txhash: result.txhash.clone(),
            },
            _ => PostOutcome::Rejected,
        }
    }
}

/// A typed reply event.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionEvent {
    Connect(ConnectPayload),
    Sign(SignPayload),
    Post(PostPayload),
    /// An event name this crate does not model.
    Other { name: String, payload: Value },
}

impl ExtensionEvent {
    /// Decode the payload according to the event name.
    pub fn parse(name: &str, payload: Value) -> Result<Self, ExtensionError> {
        let invalid = |source| ExtensionError::InvalidPayload {
            event: name.to_string(),
            source,
        };

        match name {
            ON_CONNECT => serde_json::from_value(payload)
                .map(ExtensionEvent::Connect)
                .map_err(invalid),
            ON_SIGN => serde_json::from_value(payload)
                .map(ExtensionEvent::Sign)
                .map_err(invalid),
            ON_POST => serde_json::from_value(payload)
                .map(ExtensionEvent::Post)
                .map_err(invalid),
            _ => Ok(ExtensionEvent::Other {
                name: name.to_string(),
                payload,
            }),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ExtensionEvent::Connect(_) => ON_CONNECT,
            ExtensionEvent::Sign(_) => ON_SIGN,
            ExtensionEvent::Post(_) => ON_POST,
            ExtensionEvent::Other { name, .. } => name,
        }
    }

    /// Id of the originating request. `onConnect` carries none.
    pub fn request_id(&self) -> Option<&RequestId> {
        match self {
            ExtensionEvent::Sign(payload) => Some(&payload.id),
            ExtensionEvent::Post(payload) => Some(&payload.id),
            ExtensionEvent::Connect(_) | ExtensionEvent::Other { .. } => None,
        }
    }
}
