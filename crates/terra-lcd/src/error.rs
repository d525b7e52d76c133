//! Error types for LCD queries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LcdError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LCD returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl LcdError {
    /// HTTP status reported by the node, if the request reached it.
    pub fn status(&self) -> Option<u16> {
        match self {
            LcdError::Status { status, .. } => Some(*status),
            LcdError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
