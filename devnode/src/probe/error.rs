use std::time::Duration;

use thiserror::Error;

/// Why a single probe attempt was unhealthy.
///
/// Faults are logged and swallowed; only running out of attempts is an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeFault {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Body(String),

    #[error("no response within {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("response carries no result")]
    NoResult,
}

/// The node never answered healthily.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Health check failed: {} is not running on {host}:{port}.", crate::TOOL_NAME)]
pub struct HealthCheckError {
    pub host: String,
    pub port: String,
    pub attempts: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_error_names_endpoint() {
        let err = HealthCheckError {
            host: "127.0.0.1".to_string(),
            port: "8011".to_string(),
            attempts: 3,
        };
        assert_eq!(
            err.to_string(),
            "Health check failed: anvil-zksync is not running on 127.0.0.1:8011."
        );
    }

    #[test]
    fn test_timeout_fault_message() {
        let fault = ProbeFault::Timeout(Duration::from_secs(3));
        assert_eq!(fault.to_string(), "no response within 3000ms");
    }
}
