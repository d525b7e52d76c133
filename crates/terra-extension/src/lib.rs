//! Bridge between a page and the Station wallet extension.
//!
//! Requests go out over a fire-and-forget [`Transport`] tagged with a fresh
//! [`RequestId`]; replies come back later as named events (`onConnect`,
//! `onSign`, `onPost`) carrying that id, and are delivered to listeners
//! registered with [`Extension::on`].

pub mod error;
pub mod event;
pub mod extension;
pub mod message;
pub mod transport;

pub use error::ExtensionError;
pub use event::{
    ConnectPayload, ExtensionEvent, ON_CONNECT, ON_POST, ON_SIGN, PostOutcome, PostPayload,
    PostResult, SignPayload, SignResult,
};
pub use extension::Extension;
pub use message::{RequestId, SendData, SendType, TxOptions};
pub use transport::{ChannelTransport, Transport};
