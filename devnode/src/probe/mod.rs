//! Readiness probing of a launched node.
//!
//! A [`ReadinessProbe`] waits for a warm-up period, then sends
//! `eth_blockNumber` JSON-RPC requests through an [`RpcTransport`] until one
//! returns a `result` or the attempt budget is spent.

mod error;
mod readiness;
mod transport;

pub use error::{HealthCheckError, ProbeFault};
pub use readiness::{
    is_healthy_response, probe_request, ProbeConfig, ProbeState, ReadinessProbe, PROBE_METHOD,
};
pub use transport::{HttpRpcTransport, RpcTransport};

#[cfg(test)]
pub(crate) use readiness::tests;
