//! Error types for extension messaging.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error("Malformed '{event}' payload: {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}
