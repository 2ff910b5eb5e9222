//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

use super::options::NodeMode;

/// A configuration that cannot be launched.
///
/// Every variant is fatal: nothing is downloaded or started once one of
/// these is raised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The launch mode is not one of the supported modes.
    #[error("Invalid mode '{mode}'. Valid options: {}", NodeMode::names().join(", "))]
    InvalidMode { mode: String },

    /// The port is not an integer in 1..=65535.
    #[error("Invalid port '{port}'. Must be between 1 and 65535.")]
    InvalidPort { port: String },

    /// Fork mode was requested without a URL to fork from.
    #[error("forkUrl is required when mode is set to 'fork'.")]
    MissingForkUrl,

    /// An inputs file could not be read or parsed.
    #[error("Failed to read inputs file {}: {reason}", path.display())]
    InputsFile { path: PathBuf, reason: String },
}
