//! Drives the public client through an injected requester, the way an
//! application would plug in its own transport.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use terra_core::{Coin, Dec, LcdClientConfig, ValAddress};
use terra_lcd::{ApiRequester, LcdClient, LcdError};

/// Serves a small fixed oracle state and counts round trips.
#[derive(Default)]
struct FixtureNode {
    calls: AtomicUsize,
}

#[async_trait]
impl ApiRequester for FixtureNode {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, LcdError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let result = match path {
            "/oracle/denoms/exchange_rates" => json!([
                { "denom": "ukrw", "amount": "3500.12" },
                { "denom": "usdr", "amount": "2.07" }
            ]),
            "/oracle/votes" if query.is_empty() => {
                return Err(LcdError::Status {
                    status: 400,
                    body: "at least one of denom or validator is required".to_string(),
                });
            }
            "/oracle/votes" => json!([]),
            _ => {
                return Err(LcdError::Status {
                    status: 501,
                    body: format!("unsupported route {path}"),
                });
            }
        };

        Ok(json!({ "height": "4242", "result": result }))
    }

    async fn post(&self, path: &str, _body: &Value) -> Result<Value, LcdError> {
        Err(LcdError::Status {
            status: 405,
            body: format!("POST not allowed on {path}"),
        })
    }
}

fn client() -> (LcdClient, Arc<FixtureNode>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("terra_lcd=debug,info")
        .try_init();

    let node = Arc::new(FixtureNode::default());
    let config = LcdClientConfig::new("http://fixture.invalid", "columbus-4");
    (LcdClient::with_requester(config, node.clone()), node)
}

#[tokio::test]
async fn exchange_rate_through_injected_requester() {
    let (lcd, node) = client();

    let rate = lcd.oracle().exchange_rate("ukrw").await.unwrap();
    assert_eq!(rate, Some(Coin::new("ukrw", "3500.12".parse::<Dec>().unwrap())));

    let missing = lcd.oracle().exchange_rate("umnt").await.unwrap();
    assert_eq!(missing, None);

    assert_eq!(node.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unfiltered_votes_error_is_returned_unchanged() {
    let (lcd, _node) = client();

    match lcd.oracle().votes(None, None).await {
        Err(LcdError::Status { status, body }) => {
            assert_eq!(status, 400);
            assert_eq!(body, "at least one of denom or validator is required");
        }
        other => panic!("expected the node's error, got {other:?}"),
    }

    let validator = ValAddress::from_bytes(&[1; 20]).unwrap();
    assert!(lcd.oracle().votes(None, Some(&validator)).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_queries_are_independent() {
    let (lcd, node) = client();
    let oracle = lcd.oracle();

    let (rates, params) = tokio::join!(oracle.exchange_rates(), oracle.parameters());
    assert_eq!(rates.unwrap().len(), 2);
    assert_eq!(params.unwrap_err().status(), Some(501));
    assert_eq!(node.calls.load(Ordering::SeqCst), 2);
}
