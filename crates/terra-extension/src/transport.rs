//! Outbound channel to the extension's in-page script.

use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;
use tokio::sync::mpsc;

/// One-way, fire-and-forget message channel to the extension.
///
/// There is no reply path here: answers arrive separately as events that the
/// host feeds into [`crate::Extension::emit`].
pub trait Transport: Send + Sync {
    /// Whether the host reports the extension as installed.
    fn is_available(&self) -> bool;

    /// Deliver a message. Must not block.
    fn send(&self, message: Value);
}

/// Transport forwarding every message into a tokio channel.
///
/// The host side drains the receiver and writes into the real stream.
#[derive(Debug)]
pub struct ChannelTransport {
    available: AtomicBool,
    tx: mpsc::UnboundedSender<Value>,
}

impl ChannelTransport {
    pub fn new(available: bool) -> (Self, mpsc::UnboundedReceiver<Value>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let transport = Self {
            available: AtomicBool::new(available),
            tx,
        };
        (transport, rx)
    }

    /// Update the host availability flag.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

impl Transport for ChannelTransport {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn send(&self, message: Value) {
        if self.tx.send(message).is_err() {
            tracing::debug!("Extension stream closed, message dropped");
        }
    }
}
