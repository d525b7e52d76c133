//! HTTP request layer shared by every API sub-object.
//!
//! Each call is a single independent round trip: no retries, no caching and
//! no backoff. Failures are returned to the caller unchanged.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use terra_core::serializers;

use crate::error::LcdError;

/// Envelope the LCD wraps around every query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LcdResponse<T> {
    /// Block height the query was answered at.
    #[serde(default, with = "serializers::from_str")]
    pub height: u64,
    pub result: T,
}

/// Issues requests against the LCD and returns the decoded JSON body.
#[async_trait]
pub trait ApiRequester: Send + Sync {
    /// `GET` a path under the base URL with the given query pairs.
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, LcdError>;

    /// `POST` a JSON body to a path under the base URL.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, LcdError>;
}

/// `ApiRequester` backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpRequester {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRequester {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured client, e.g. one with a request timeout.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a path and its query pairs.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, LcdError> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| LcdError::InvalidUrl(format!("{raw}: {e}")))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Value, LcdError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!("LCD request failed with HTTP {}", status);
            return Err(LcdError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ApiRequester for HttpRequester {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, LcdError> {
        let url = self.url(path, query)?;
        tracing::debug!("GET {}", url);
        self.execute(self.client.get(url)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, LcdError> {
        let url = self.url(path, &[])?;
        tracing::debug!("POST {}", url);
        self.execute(self.client.post(url).json(body)).await
    }
}
