//! Logging setup for the CLI.
//!
//! Installs a global `tracing` subscriber with:
//! - a console layer on stdout (or stderr, for commands whose stdout is
//!   their result), uncoloured when running inside a workflow job
//! - an optional file layer (cleared on start) behind a non-blocking writer
//! - an `EnvFilter` from `RUST_LOG`, defaulting to `info`, or `debug` when
//!   debug output was requested with `--debug` or by the runner
//!   (`RUNNER_DEBUG=1`)

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Set to `1` by the runner when step debug logging is enabled.
pub const RUNNER_DEBUG_ENV: &str = "RUNNER_DEBUG";

/// Set to `true` by the runner for every workflow job.
pub const GITHUB_ACTIONS_ENV: &str = "GITHUB_ACTIONS";

/// Errors from logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to prepare log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to install log subscriber: {0}")]
    Subscriber(String),
}

/// Stream the console layer writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleStream {
    #[default]
    Stdout,
    /// Keeps stdout free for machine-readable output.
    Stderr,
}

impl ConsoleStream {
    fn make_writer(self) -> BoxMakeWriter {
        match self {
            ConsoleStream::Stdout => BoxMakeWriter::new(io::stdout),
            ConsoleStream::Stderr => BoxMakeWriter::new(io::stderr),
        }
    }
}

/// Logging options chosen by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Force debug level regardless of the environment.
    pub debug: bool,
    /// Also write logs to this file.
    pub log_file: Option<PathBuf>,
    /// Where console output goes.
    pub console: ConsoleStream,
}

impl LoggingOptions {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }

    pub fn with_console(mut self, console: ConsoleStream) -> Self {
        self.console = console;
        self
    }

    /// Whether debug output is enabled by flag or by the runner.
    pub fn debug_enabled(&self) -> bool {
        self.debug || runner_debug_enabled()
    }

    fn default_directive(&self) -> &'static str {
        if self.debug_enabled() {
            "debug"
        } else {
            "info"
        }
    }
}

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the log file writer, if any.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Whether the runner requested debug logging.
pub fn runner_debug_enabled() -> bool {
    std::env::var(RUNNER_DEBUG_ENV).map(|v| v.trim() == "1").unwrap_or(false)
}

/// Whether this process runs inside a GitHub Actions job.
pub fn running_in_actions() -> bool {
    std::env::var(GITHUB_ACTIONS_ENV)
        .map(|v| v.trim() == "true")
        .unwrap_or(false)
}

/// Initialize the global subscriber.
///
/// # Errors
///
/// Fails if the log file cannot be created, or if a global subscriber is
/// already installed.
pub fn init_logging(options: &LoggingOptions) -> Result<LoggingGuard, LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.default_directive()));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(options.console.make_writer())
        .with_ansi(!running_in_actions())
        .with_target(false);

    let (file_layer, file_guard) = match &options.log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Subscriber(e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Create the log file's directory, clear the file, and open a non-blocking
/// writer to it.
fn file_writer(
    path: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), LoggingError> {
    let log_error = |source: io::Error| LoggingError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        log_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "log file path has no file name",
        ))
    })?;

    fs::create_dir_all(&dir).map_err(log_error)?;
    fs::write(path, "").map_err(log_error)?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}
