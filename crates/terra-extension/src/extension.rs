//! The extension bridge and its process-wide handle.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

use crate::event::{ExtensionEvent, ON_CONNECT, ON_POST, ON_SIGN};
use crate::message::{RequestId, SendData, SendType, TxOptions};
use crate::transport::Transport;

/// Returns `false` once it will never accept another event.
type Listener = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Process-wide bridge. There is a single channel to the extension per page,
/// so it must not be opened twice.
static INSTANCE: Mutex<Option<Arc<Extension>>> = Mutex::new(None);

/// Wire form of a request: `{id, type, ...payload}`.
#[derive(Serialize)]
struct Outbound<'a, P: Serialize> {
    id: &'a RequestId,
    #[serde(rename = "type")]
    kind: SendType,
    #[serde(flatten)]
    payload: &'a P,
}

/// Request/reply correlation over a one-way transport.
///
/// `connect`, `sign` and `post` return immediately with a fresh id. The
/// reply arrives later as an event carrying that id. The bridge keeps no
/// record of outstanding requests and has no timeout: a caller that needs
/// either keeps its own bookkeeping.
pub struct Extension {
    transport: Arc<dyn Transport>,
    last_id: AtomicU64,
    listeners: Mutex<HashMap<String, Vec<Listener>>>,
}

impl Extension {
    pub(crate) fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            last_id: AtomicU64::new(0),
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Get the process-wide bridge, creating it over `transport` on first use.
    ///
    /// Later calls return the same instance and drop their transport.
    pub fn install(transport: impl Transport + 'static) -> Arc<Extension> {
        let mut instance = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = instance.as_ref() {
            tracing::debug!("Extension bridge already installed, reusing it");
            return existing.clone();
        }

        let extension = Arc::new(Extension::new(transport));
        *instance = Some(extension.clone());
        tracing::debug!("Extension bridge installed");
        extension
    }

    /// The process-wide bridge, if installed.
    pub fn instance() -> Option<Arc<Extension>> {
        INSTANCE
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Release the process-wide bridge. Handles already given out stay usable.
    pub fn teardown() -> Option<Arc<Extension>> {
        let previous = INSTANCE
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            tracing::debug!("Extension bridge torn down");
        }
        previous
    }

    /// Whether the host reports the extension as installed.
    pub fn is_available(&self) -> bool {
        self.transport.is_available()
    }

    /// Send a raw message. Dropped silently when the extension is unavailable.
    pub fn send(&self, data: SendData) {
        self.dispatch(&data.id, data.kind, &data.payload);
    }

    /// Ask the extension to connect a wallet. Replied to with `onConnect`.
    pub fn connect(&self) -> RequestId {
        self.request(SendType::Connect, &Map::new())
    }

    /// Ask the extension to sign a transaction. Replied to with `onSign`.
    pub fn sign(&self, options: &TxOptions) -> RequestId {
        self.request(SendType::Sign, options)
    }

    /// Ask the extension to sign and broadcast a transaction. Replied to with `onPost`.
    pub fn post(&self, options: &TxOptions) -> RequestId {
        self.request(SendType::Post, options)
    }

    /// Register a listener for the named event.
    ///
    /// Listeners are never removed and only see events emitted after they
    /// were registered.
    pub fn on<F>(&self, name: &str, callback: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.listen(name, move |payload| {
            callback(payload);
            true
        });
    }

    /// Register a typed listener for `onConnect`, `onSign` and `onPost`.
    /// Malformed payloads are logged and skipped.
    pub fn on_event<F>(&self, callback: F)
    where
        F: Fn(ExtensionEvent) + Send + Sync + 'static,
    {
        self.listen_typed(move |event| {
            callback(event);
            true
        });
    }

    /// Stream of typed reply events, e.g. to wait for one under a timeout.
    ///
    /// The listeners feeding the stream are removed on the first event
    /// delivered after the receiver is dropped.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ExtensionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let closed = tx.clone();
        self.listen_typed_while(
            move || !closed.is_closed(),
            move |event| tx.send(event).is_ok(),
        );
        rx
    }

    /// Deliver an inbound event to its listeners, in registration order.
    ///
    /// Called by the host glue for each message read from the extension.
    /// Events nobody listens to are dropped.
    pub fn emit(&self, name: &str, payload: &Value) {
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .unwrap_or_default();

        if listeners.is_empty() {
            tracing::debug!("No listener for extension event '{}'", name);
            return;
        }

        let finished: Vec<Listener> = listeners
            .into_iter()
            .filter(|listener| !(**listener)(payload))
            .collect();

        if !finished.is_empty() {
            let mut registry = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(registered) = registry.get_mut(name) {
                registered.retain(|listener| {
                    !finished
                        .iter()
                        .any(|done| std::ptr::addr_eq(Arc::as_ptr(listener), Arc::as_ptr(done)))
                });
            }
            tracing::debug!("Dropped {} closed '{}' listener(s)", finished.len(), name);
        }
    }

    fn listen<F>(&self, name: &str, callback: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_default()
            .push(Arc::new(callback));
    }

    fn listen_typed<F>(&self, callback: F)
    where
        F: Fn(ExtensionEvent) -> bool + Send + Sync + 'static,
    {
        self.listen_typed_while(|| true, callback);
    }

    /// Typed listeners on every reply name. Each is dropped once `open`
    /// reports `false` or `callback` refuses an event.
    fn listen_typed_while<O, F>(&self, open: O, callback: F)
    where
        O: Fn() -> bool + Send + Sync + 'static,
        F: Fn(ExtensionEvent) -> bool + Send + Sync + 'static,
    {
        let open = Arc::new(open);
        let callback = Arc::new(callback);
        for name in [ON_CONNECT, ON_SIGN, ON_POST] {
            let open = open.clone();
            let callback = callback.clone();
            self.listen(name, move |payload| {
                if !open() {
                    return false;
                }
                match ExtensionEvent::parse(name, payload.clone()) {
                    Ok(event) => callback(event),
                    Err(e) => {
                        tracing::warn!("Ignoring extension event: {}", e);
                        true
                    }
                }
            });
        }
    }

    fn request<P: Serialize>(&self, kind: SendType, payload: &P) -> RequestId {
        let id = self.next_id();
        self.dispatch(&id, kind, payload);
        id
    }

    /// Encode and send one request. Nothing goes out if the payload does not
    /// encode to a complete message.
    fn dispatch<P: Serialize>(&self, id: &RequestId, kind: SendType, payload: &P) {
        if !self.is_available() {
            tracing::debug!("Extension unavailable, dropping {} request {}", kind, id);
            return;
        }

        match serde_json::to_value(Outbound { id, kind, payload }) {
            Ok(message) => {
                tracing::debug!("Sending {} request {}", kind, id);
                self.transport.send(message);
            }
            Err(e) => tracing::warn!("Not sending {} request {}: {}", kind, id, e),
        }
    }

    fn next_id(&self) -> RequestId {
        RequestId::Number(self.last_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[cfg(test)]
    fn listener_count(&self, name: &str) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map_or(0, Vec::len)
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("available", &self.is_available())
            .field("last_id", &self.last_id.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
