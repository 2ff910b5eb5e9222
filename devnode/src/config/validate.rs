//! Launchability checks for a resolved [`NodeConfig`].

use super::error::ConfigError;
use super::options::NodeMode;
use super::record::NodeConfig;

/// Lowest accepted port.
pub const MIN_PORT: u32 = 1;
/// Highest accepted port.
pub const MAX_PORT: u32 = 65535;

/// Check that a configuration can be launched.
///
/// Purely local: no network or filesystem access. The first violation found
/// is returned, checked in the order mode, port, fork source.
pub fn validate(config: &NodeConfig) -> Result<(), ConfigError> {
    let mode: NodeMode = config.mode().parse()?;
    validate_port(config.port())?;

    if mode == NodeMode::Fork && config.fork_url().is_none() {
        return Err(ConfigError::MissingForkUrl);
    }

    Ok(())
}

/// Parse a port, accepting only integers in [`MIN_PORT`]..=[`MAX_PORT`].
pub fn validate_port(port: &str) -> Result<u16, ConfigError> {
    let invalid = || ConfigError::InvalidPort {
        port: port.to_string(),
    };

    let value: u32 = port.trim().parse().map_err(|_| invalid())?;
    if !(MIN_PORT..=MAX_PORT).contains(&value) {
        return Err(invalid());
    }
    u16::try_from(value).map_err(|_| invalid())
}
