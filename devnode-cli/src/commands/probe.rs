//! Health-check a node that is already running.

use devnode::launcher::DefaultLauncher;
use devnode::TOOL_NAME;

use crate::error::CliError;
use crate::runner::CliRunner;

pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("probe");

    let config = runner.config();
    let launcher = DefaultLauncher::from_env()?;
    let attempt = runner.block_on(launcher.probe(config))?;

    println!(
        "{} is ready on {}:{} (attempt {})",
        TOOL_NAME,
        config.host(),
        config.port(),
        attempt
    );
    Ok(())
}
