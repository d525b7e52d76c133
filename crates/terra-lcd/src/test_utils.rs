//! Recording requester for exercising API sub-objects without a node.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::LcdError;
use crate::requester::ApiRequester;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    responses: HashMap<String, Result<Value, (u16, String)>>,
    requests: Vec<RecordedRequest>,
}

/// Answers by path with canned bodies and records every request it sees.
/// Paths without a canned answer get a 404.
#[derive(Clone, Default)]
pub(crate) struct MockRequester {
    state: Arc<Mutex<MockState>>,
}

impl MockRequester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `result` wrapped in the LCD envelope.
    pub fn respond_result(&self, path: &str, result: Value) {
        self.respond(path, json!({ "height": "100", "result": result }));
    }

    /// Answer `path` with a raw body.
    pub fn respond(&self, path: &str, body: Value) {
        let mut state = self.state.lock().unwrap();
        state.responses.insert(path.to_string(), Ok(body));
    }

    /// Answer `path` with an HTTP error.
    pub fn fail(&self, path: &str, status: u16, body: &str) {
        let mut state = self.state.lock().unwrap();
        state
            .responses
            .insert(path.to_string(), Err((status, body.to_string())));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    fn answer(&self, request: RecordedRequest) -> Result<Value, LcdError> {
        let mut state = self.state.lock().unwrap();
        let answer = state.responses.get(&request.path).cloned();
        state.requests.push(request);

        match answer {
            Some(Ok(body)) => Ok(body),
            Some(Err((status, body))) => Err(LcdError::Status { status, body }),
            None => Err(LcdError::Status {
                status: 404,
                body: "not found".to_string(),
            }),
        }
    }
}

#[async_trait]
impl ApiRequester for MockRequester {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, LcdError> {
        self.answer(RecordedRequest {
            method: "GET",
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: None,
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, LcdError> {
        self.answer(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_post_body() {
        let mock = MockRequester::new();
        mock.respond("/txs", json!({ "txhash": "AB" }));

        let body = json!({ "tx": { "memo": "hi" }, "mode": "sync" });
        let answer = mock.post("/txs", &body).await.unwrap();
        assert_eq!(answer["txhash"], "AB");

        let requests = mock.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].body, Some(body));
    }

    #[tokio::test]
    async fn test_get_has_no_body_and_unknown_path_is_404() {
        let mock = MockRequester::new();
        let err = mock.get("/nowhere", &[("a", "b")]).await.unwrap_err();
        assert_eq!(err.status(), Some(404));

        let requests = mock.requests();
        assert_eq!(requests[0].query, vec![("a".to_string(), "b".to_string())]);
        assert_eq!(requests[0].body, None);
    }
}
