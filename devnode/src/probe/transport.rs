//! JSON-RPC transport for readiness checks.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::trace;

use super::error::ProbeFault;

/// Sends one JSON-RPC request and returns the decoded response body.
pub trait RpcTransport: Send + Sync {
    /// POST `body` to `url`, giving up after `timeout`.
    ///
    /// Non-success statuses and undecodable bodies are faults.
    fn post(
        &self,
        url: &str,
        body: &Value,
        timeout: Duration,
    ) -> impl Future<Output = Result<Value, ProbeFault>> + Send;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone, Default)]
pub struct HttpRpcTransport {
    client: reqwest::Client,
}

impl HttpRpcTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RpcTransport for HttpRpcTransport {
    async fn post(&self, url: &str, body: &Value, timeout: Duration) -> Result<Value, ProbeFault> {
        trace!(url = url, "JSON-RPC request starting");

        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeFault::Timeout(timeout)
                } else {
                    ProbeFault::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ProbeFault::Status(response.status().as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProbeFault::Body(e.to_string()))
    }
}
