//! `tracing` and no-op loggers.

use std::fmt::Arguments;

use super::{LogLevel, Logger};

/// Logger that emits `tracing` events tagged with a `source` field.
///
/// Events only appear once a subscriber is installed, see
/// [`init_logging`](crate::logging::init_logging).
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    source: &'static str,
}

impl TracingLogger {
    /// Logger for lines produced by `source`.
    pub fn new(source: &'static str) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(crate::TOOL_NAME)
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        let source = self.source;
        match level {
            LogLevel::Debug => tracing::debug!(source, "{}", args),
            LogLevel::Info => tracing::info!(source, "{}", args),
            LogLevel::Warn => tracing::warn!(source, "{}", args),
            LogLevel::Error => tracing::error!(source, "{}", args),
        }
    }
}

/// Logger that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}
