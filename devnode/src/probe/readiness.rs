//! Readiness polling state machine.
//!
//! ```text
//!  Waiting --warm-up--> Probing(1) --healthy--> Ready(1)
//!                          |
//!                      unhealthy, attempts left: wait interval
//!                          v
//!                      Probing(2) ... Probing(n) --unhealthy--> Exhausted(n)
//! ```
//!
//! Delays are fixed; there is no backoff.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, info};

use super::error::{HealthCheckError, ProbeFault};
use super::transport::RpcTransport;
use crate::config::HealthCheckSettings;

/// JSON-RPC method used to ask the node for its head block.
pub const PROBE_METHOD: &str = "eth_blockNumber";

/// Probe timing and budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Delay before the first attempt.
    pub warmup: Duration,
    /// Delay between attempts.
    pub interval: Duration,
    /// Total attempts, at least one.
    pub attempts: u32,
    /// Deadline of one attempt.
    pub timeout: Duration,
}

impl ProbeConfig {
    pub fn with_warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::from(&HealthCheckSettings::default())
    }
}

impl From<&HealthCheckSettings> for ProbeConfig {
    fn from(settings: &HealthCheckSettings) -> Self {
        Self {
            warmup: settings.warmup,
            interval: settings.interval,
            attempts: settings.retries.max(1),
            timeout: settings.timeout,
        }
    }
}

/// Where the probe is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    /// Warm-up delay not yet elapsed.
    Waiting,
    /// About to run the given attempt (1-based).
    Probing { attempt: u32 },
    /// The given attempt was healthy. Terminal.
    Ready { attempt: u32 },
    /// Every attempt failed. Terminal.
    Exhausted { attempts: u32 },
}

impl ProbeState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProbeState::Ready { .. } | ProbeState::Exhausted { .. })
    }
}

/// The JSON-RPC request body sent on every attempt.
pub fn probe_request() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": PROBE_METHOD,
        "params": [],
    })
}

/// A response is healthy when it carries a `result` member, whatever its
/// value. Error envelopes have none.
pub fn is_healthy_response(response: &Value) -> bool {
    response
        .as_object()
        .map(|object| object.contains_key("result"))
        .unwrap_or(false)
}

/// Polls a node endpoint until it answers or the attempt budget runs out.
pub struct ReadinessProbe<T> {
    transport: T,
    host: String,
    port: String,
    config: ProbeConfig,
    state: ProbeState,
}

impl<T: RpcTransport> ReadinessProbe<T> {
    pub fn new(transport: T, host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            transport,
            host: host.into(),
            port: port.into(),
            config: ProbeConfig::default(),
            state: ProbeState::Waiting,
        }
    }

    pub fn with_config(mut self, config: ProbeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// `http://<host>:<port>`
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Perform one transition and return the new state.
    ///
    /// Terminal states are returned unchanged.
    pub async fn step(&mut self) -> ProbeState {
        self.state = match self.state {
            ProbeState::Waiting => {
                debug!(
                    warmup_ms = self.config.warmup.as_millis() as u64,
                    "Waiting before first health check"
                );
                tokio::time::sleep(self.config.warmup).await;
                ProbeState::Probing { attempt: 1 }
            }
            ProbeState::Probing { attempt } => match self.attempt().await {
                Ok(()) => {
                    info!("Health check passed on attempt {}", attempt);
                    ProbeState::Ready { attempt }
                }
                Err(fault) => {
                    debug!(
                        "Health check failed for {}:{} - {}",
                        self.host, self.port, fault
                    );
                    if attempt < self.config.attempts {
                        info!(
                            "Health check attempt {} failed. Retrying in {}ms...",
                            attempt,
                            self.config.interval.as_millis()
                        );
                        tokio::time::sleep(self.config.interval).await;
                        ProbeState::Probing {
                            attempt: attempt + 1,
                        }
                    } else {
                        ProbeState::Exhausted { attempts: attempt }
                    }
                }
            },
            terminal => terminal,
        };
        self.state
    }

    /// Drive the probe to a terminal state.
    ///
    /// # Returns
    ///
    /// The attempt that succeeded.
    pub async fn wait_until_ready(&mut self) -> Result<u32, HealthCheckError> {
        loop {
            match self.step().await {
                ProbeState::Ready { attempt } => return Ok(attempt),
                ProbeState::Exhausted { attempts } => {
                    return Err(HealthCheckError {
                        host: self.host.clone(),
                        port: self.port.clone(),
                        attempts,
                    })
                }
                ProbeState::Waiting | ProbeState::Probing { .. } => {}
            }
        }
    }

    async fn attempt(&self) -> Result<(), ProbeFault> {
        let url = self.url();
        let request = probe_request();
        let timeout = self.config.timeout;

        let response = tokio::time::timeout(timeout, self.transport.post(&url, &request, timeout))
            .await
            .map_err(|_| ProbeFault::Timeout(timeout))??;

        if is_healthy_response(&response) {
            Ok(())
        } else {
            Err(ProbeFault::NoResult)
        }
    }
}
