//! End-to-end launch sequence.
//!
//! Validate, provision, build arguments, launch detached, then probe until
//! ready. The first failing stage aborts the rest. Nothing is rolled back: a
//! downloaded tool stays cached and a launched node keeps running.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::args;
use crate::config::{validate, ConfigError, NodeConfig};
use crate::log::{Logger, TracingLogger};
use crate::probe::{HealthCheckError, HttpRpcTransport, ProbeConfig, ReadinessProbe, RpcTransport};
use crate::process::{LaunchError, OutputMode, ProcessSupervisor};
use crate::provision::{
    ArchiveExtractor, ArtifactFetcher, GithubReleaseClient, GithubToolProvisioner,
    HttpArtifactFetcher, ProvisionError, ReleaseClient, TarGzExtractor, ToolProvisioner,
};
use crate::TOOL_NAME;

/// A failed launch. Its message is the single line reported to the job.
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    HealthCheck(#[from] HealthCheckError),
}

/// Outcome of a successful launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub host: String,
    pub port: String,
    pub executable: PathBuf,
    pub args: Vec<String>,
    /// Probe attempt that found the node healthy.
    pub attempt: u32,
}

impl LaunchReport {
    /// `<host>:<port>`
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Launcher wired to GitHub releases and HTTP probing.
pub type DefaultLauncher =
    Launcher<GithubReleaseClient, HttpArtifactFetcher, TarGzExtractor, HttpRpcTransport>;

/// Runs the launch sequence over injectable collaborators.
pub struct Launcher<R, F, E, T> {
    provisioner: ToolProvisioner<R, F, E>,
    transport: T,
    logger: Arc<dyn Logger>,
}

impl DefaultLauncher {
    /// Production launcher configured from the environment.
    pub fn from_env() -> Result<Self, LauncherError> {
        Ok(Self::new(
            GithubToolProvisioner::from_env()?,
            HttpRpcTransport::new(),
        ))
    }
}

impl<R, F, E, T> Launcher<R, F, E, T>
where
    R: ReleaseClient,
    F: ArtifactFetcher,
    E: ArchiveExtractor,
    T: RpcTransport + Clone,
{
    pub fn new(provisioner: ToolProvisioner<R, F, E>, transport: T) -> Self {
        Self {
            provisioner,
            transport,
            logger: Arc::new(TracingLogger::default()),
        }
    }

    /// Logger receiving forwarded node output.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn provisioner(&self) -> &ToolProvisioner<R, F, E> {
        &self.provisioner
    }

    /// Validate and provision; returns the tool directory.
    pub async fn provision(&self, config: &NodeConfig) -> Result<PathBuf, LauncherError> {
        validate(config)?;
        let dir = self
            .provisioner
            .provision(config.release_tag(), config.target())
            .await?;
        Ok(dir)
    }

    /// Validate and probe an already running node.
    pub async fn probe(&self, config: &NodeConfig) -> Result<u32, LauncherError> {
        validate(config)?;
        Ok(self.wait_until_ready(config).await?)
    }

    /// Run the full sequence.
    pub async fn run(&self, config: &NodeConfig) -> Result<LaunchReport, LauncherError> {
        let dir = self.provision(config).await?;
        let executable = self.provisioner.executable_path(&dir);

        let args = args::build(config);
        info!("Starting {} with args: {}", TOOL_NAME, args::display(&args));

        ProcessSupervisor::new(Arc::clone(&self.logger))
            .with_output(OutputMode::from_forward(config.forward_output()))
            .launch(&executable, &args)
            .await?;

        let attempt = self.wait_until_ready(config).await?;
        debug!(attempt = attempt, "Launch sequence complete");

        Ok(LaunchReport {
            host: config.host().to_string(),
            port: config.port().to_string(),
            executable,
            args,
            attempt,
        })
    }

    async fn wait_until_ready(&self, config: &NodeConfig) -> Result<u32, HealthCheckError> {
        ReadinessProbe::new(self.transport.clone(), config.host(), config.port())
            .with_config(ProbeConfig::from(config.health_check()))
            .wait_until_ready()
            .await
    }
}
