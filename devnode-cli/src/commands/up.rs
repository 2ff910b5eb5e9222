//! Full launch sequence.

use devnode::launcher::DefaultLauncher;
use devnode::TOOL_NAME;

use crate::error::CliError;
use crate::runner::CliRunner;

pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("up");

    let launcher = DefaultLauncher::from_env()?;
    let report = runner.block_on(launcher.run(runner.config()))?;

    println!(
        "{} started successfully on {}",
        TOOL_NAME,
        report.endpoint()
    );
    Ok(())
}
