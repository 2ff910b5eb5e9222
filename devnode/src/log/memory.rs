//! In-memory logger.

use std::fmt::Arguments;
use std::sync::Mutex;

use super::{LogLevel, Logger};

/// Logger that records every line.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded lines in order.
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Recorded messages at one level.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((level, args.to_string()));
    }
}
