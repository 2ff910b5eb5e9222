use std::path::PathBuf;

use thiserror::Error;

/// The node process could not be started.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file for forwarded output could not be created.
    #[error("Failed to create output log {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
