//! Detached launch of the node process.

mod error;
mod supervisor;

pub use error::LaunchError;
pub use supervisor::{OutputLogs, OutputMode, ProcessSupervisor, OUTPUT_DIR_ENV};
