//! CLI error handling.
//!
//! Every failure ends the process with exactly one message and exit code 1.
//! Inside a workflow job the message is also emitted as an `::error::`
//! command so the job summary shows it.

use std::fmt;
use std::process;

use devnode::config::ConfigError;
use devnode::launcher::LauncherError;
use devnode::logging::running_in_actions;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// The inputs file could not be read
    Inputs(ConfigError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// A launch stage failed
    Launch(LauncherError),
}

impl CliError {
    /// Report the error and exit the process.
    pub fn exit(&self) -> ! {
        let message = self.to_string();
        if running_in_actions() {
            println!("::error::{}", escape_workflow_data(&message));
        }
        eprintln!("Error: {}", message);
        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Inputs(e) => write!(f, "{}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            // Stage errors already carry the final wording
            CliError::Launch(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Inputs(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Launch(e) => Some(e),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<LauncherError> for CliError {
    fn from(e: LauncherError) -> Self {
        CliError::Launch(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Launch(LauncherError::Config(e))
    }
}

/// Escape a message for use as workflow command data.
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_workflow_data() {
        assert_eq!(escape_workflow_data("100% done\nnext"), "100%25 done%0Anext");
        assert_eq!(escape_workflow_data("plain"), "plain");
    }

    #[test]
    fn test_config_error_displays_unchanged() {
        let err = CliError::from(ConfigError::InvalidPort {
            port: "0".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Invalid port '0'. Must be between 1 and 65535."
        );
    }
}
