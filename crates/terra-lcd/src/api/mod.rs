//! Typed query sub-objects, one per chain module.

pub mod oracle;

pub use oracle::OracleApi;

use serde::de::DeserializeOwned;

use crate::error::LcdError;
use crate::requester::{ApiRequester, LcdResponse};

/// Issue one `GET` and unwrap the `result` field of the envelope.
pub(crate) async fn get_result<T: DeserializeOwned>(
    requester: &dyn ApiRequester,
    path: &str,
    query: &[(&str, &str)],
) -> Result<T, LcdError> {
    let body = requester.get(path, query).await?;
    let response: LcdResponse<T> = serde_json::from_value(body)?;
    Ok(response.result)
}
