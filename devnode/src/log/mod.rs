//! Logging collaborator.
//!
//! Library code logs through `tracing` directly. The [`Logger`] trait exists
//! for output that does not originate in this process: lines the node prints
//! on stdout/stderr are handed to a logger by the process supervisor, which
//! lets tests observe them without installing a subscriber.
//!
//! - [`TracingLogger`] forwards to `tracing`, tagging each event with the
//!   source it came from
//! - [`NoOpLogger`] discards everything
//! - [`MemoryLogger`] keeps every line for later inspection
//!
//! ```
//! use devnode::log::{Logger, MemoryLogger, LogLevel};
//! use devnode::log_info;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(MemoryLogger::new());
//! log_info!(logger, "block {} sealed", 7);
//! assert_eq!(logger.lines(), vec![(LogLevel::Info, "block 7 sealed".to_string())]);
//! ```

mod adapters;
mod memory;
mod r#trait;

pub use adapters::{NoOpLogger, TracingLogger};
pub use memory::MemoryLogger;
pub use r#trait::{LogLevel, Logger};
