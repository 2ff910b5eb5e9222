//! Logger trait definition.

use std::fmt::Arguments;

/// Severity of a logged line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Sink for log lines.
///
/// Implementations must be `Send + Sync`: the supervisor forwards stdout and
/// stderr from separate tasks.
pub trait Logger: Send + Sync {
    /// Log a message at the given level.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::log::MemoryLogger;

    #[test]
    fn test_macros_log_at_their_level() {
        let logger = MemoryLogger::new();

        crate::log_debug!(logger, "warming up {}", 1);
        crate::log_info!(logger, "listening");
        crate::log_warn!(logger, "slow start");
        crate::log_error!(logger, "bind failed on {}", 8011);

        assert_eq!(
            logger.lines(),
            vec![
                (LogLevel::Debug, "warming up 1".to_string()),
                (LogLevel::Info, "listening".to_string()),
                (LogLevel::Warn, "slow start".to_string()),
                (LogLevel::Error, "bind failed on 8011".to_string()),
            ]
        );
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
