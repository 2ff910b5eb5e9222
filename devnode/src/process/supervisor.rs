//! Fire-and-forget process launch.
//!
//! The launched node belongs to the host environment, not to this process:
//! it is started in its own process group, its handle is dropped right after
//! spawning, and it is never killed or waited on. A CI job ending is what
//! eventually stops it.
//!
//! The node never writes into a pipe owned by this process. Forwarded output
//! goes to log files that are followed into the logger for as long as the
//! runtime lives; once it is gone the node keeps writing to the files.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use super::error::LaunchError;
use crate::log::{LogLevel, Logger};
use crate::{log_debug, log_warn, TOOL_NAME};

/// Directory for forwarded output when none is configured.
pub const OUTPUT_DIR_ENV: &str = "RUNNER_TEMP";

/// How often a follower polls its log file at end of file.
const FOLLOW_INTERVAL: Duration = Duration::from_millis(100);

/// What happens to the node's stdout and stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Streams are connected to the null device.
    #[default]
    Ignore,
    /// Streams are written to log files, and each line is forwarded to the
    /// logger: stdout at info, stderr at error.
    ///
    /// Forwarding stops with the runtime. The files keep growing.
    Forward,
}

impl OutputMode {
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            OutputMode::Forward
        } else {
            OutputMode::Ignore
        }
    }
}

/// Log files receiving a forwarded node's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLogs {
    pub stdout: PathBuf,
    pub stderr: PathBuf,
}

impl OutputLogs {
    fn in_dir(dir: &Path) -> Self {
        Self {
            stdout: dir.join(format!("{}.stdout.log", TOOL_NAME)),
            stderr: dir.join(format!("{}.stderr.log", TOOL_NAME)),
        }
    }
}

/// Starts the node detached from the caller.
pub struct ProcessSupervisor {
    logger: Arc<dyn Logger>,
    output: OutputMode,
    log_dir: PathBuf,
}

impl ProcessSupervisor {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            output: OutputMode::Ignore,
            log_dir: default_log_dir(),
        }
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Directory that receives forwarded output files.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }

    /// Files a forwarded launch writes to.
    pub fn output_logs(&self) -> OutputLogs {
        OutputLogs::in_dir(&self.log_dir)
    }

    /// Start `executable` with `args` and return as soon as it is running.
    ///
    /// Only a failure to spawn is reported. Whether the node then comes up
    /// is for the readiness probe to find out. Must be called within a
    /// Tokio runtime.
    pub async fn launch(&self, executable: &Path, args: &[String]) -> Result<(), LaunchError> {
        let mut command = Command::new(executable);
        command.args(args).stdin(Stdio::null()).kill_on_drop(false);

        let logs = match self.output {
            OutputMode::Ignore => {
                command.stdout(Stdio::null()).stderr(Stdio::null());
                None
            }
            OutputMode::Forward => {
                let logs = self.output_logs();
                command
                    .stdout(create_log(&logs.stdout)?)
                    .stderr(create_log(&logs.stderr)?);
                Some(logs)
            }
        };

        detach(&mut command);

        let child = command.spawn().map_err(|source| LaunchError::Spawn {
            program: executable.to_path_buf(),
            source,
        })?;

        debug!(
            program = %executable.display(),
            pid = child.id(),
            "Node process started"
        );

        if let Some(logs) = logs {
            info!(
                "Writing {} output to {} and {}",
                TOOL_NAME,
                logs.stdout.display(),
                logs.stderr.display()
            );
            spawn_follower(logs.stdout, Arc::clone(&self.logger), LogLevel::Info);
            spawn_follower(logs.stderr, Arc::clone(&self.logger), LogLevel::Error);
        }

        // Dropping the handle neither kills nor waits on the child.
        drop(child);
        Ok(())
    }
}

fn default_log_dir() -> PathBuf {
    std::env::var_os(OUTPUT_DIR_ENV)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join("devnode")
}

/// Create (or truncate) a log file and hand it over as a child stream.
fn create_log(path: &Path) -> Result<Stdio, LaunchError> {
    let output = |source| LaunchError::Output {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(output)?;
    }
    let file = File::create(path).map_err(output)?;
    Ok(Stdio::from(file))
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    // New process group: signals aimed at ours do not reach the node
    command.process_group(0);
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}

/// Forward complete lines appended to `path` until the runtime shuts down.
fn spawn_follower(path: PathBuf, logger: Arc<dyn Logger>, level: LogLevel) {
    tokio::spawn(async move {
        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) => {
                log_warn!(logger, "Cannot follow {}: {}", path.display(), e);
                return;
            }
        };
        log_debug!(logger, "Following {}", path.display());

        let mut reader = BufReader::new(file);
        let mut line = String::new();
        loop {
            match reader.read_line(&mut line).await {
                Ok(0) => tokio::time::sleep(FOLLOW_INTERVAL).await,
                Ok(_) if line.ends_with('\n') => {
                    logger.log(level, format_args!("{}", line.trim_end_matches(['\r', '\n'])));
                    line.clear();
                }
                // Partial line: wait for the rest
                Ok(_) => {}
                Err(e) => {
                    log_warn!(logger, "Stopped forwarding node output: {}", e);
                    break;
                }
            }
        }
    });
}
