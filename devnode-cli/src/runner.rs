//! CLI runner for common setup.
//!
//! Initializes logging, resolves the launch inputs once, and drives async
//! work on a single-threaded runtime.

use std::future::Future;
use std::path::PathBuf;

use devnode::config::{
    ActionsInputSource, ConfigSource, IniConfigSource, InputResolver, NodeConfig,
};
use devnode::launcher::LauncherError;
use devnode::logging::{init_logging, ConsoleStream, LoggingGuard, LoggingOptions};
use tracing::{debug, info};

use crate::error::CliError;

/// Global options shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct RunnerOptions {
    pub inputs: Option<PathBuf>,
    pub debug: bool,
    pub log_file: Option<PathBuf>,
    pub console: ConsoleStream,
}

/// Runner that manages the CLI lifecycle.
pub struct CliRunner {
    /// Keeps the log file writer alive while the runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: NodeConfig,
}

impl CliRunner {
    pub fn new(options: RunnerOptions) -> Result<Self, CliError> {
        let logging = LoggingOptions::default()
            .with_debug(options.debug)
            .with_log_file(options.log_file.clone())
            .with_console(options.console);
        let logging_guard =
            init_logging(&logging).map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let source: Box<dyn ConfigSource> = match &options.inputs {
            Some(path) => {
                debug!("Reading inputs from {}", path.display());
                Box::new(
                    IniConfigSource::load_from(path)
                        .map_err(CliError::Inputs)?
                        .with_env_fallback(true),
                )
            }
            None => Box::new(ActionsInputSource::new()),
        };
        let config = InputResolver::new(source).resolve();

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// The resolved launch configuration.
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("devnode v{}", devnode::VERSION);
        debug!("devnode CLI: {} command", command);
    }

    /// Run a launch stage to completion.
    pub fn block_on<T, F>(&self, future: F) -> Result<T, CliError>
    where
        F: Future<Output = Result<T, LauncherError>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;
        runtime.block_on(future).map_err(CliError::from)
    }
}
