//! Download or reuse the node binary.

use devnode::launcher::DefaultLauncher;

use crate::error::CliError;
use crate::runner::CliRunner;

pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("provision");

    let launcher = DefaultLauncher::from_env()?;
    let dir = runner.block_on(launcher.provision(runner.config()))?;

    println!("{}", launcher.provisioner().executable_path(&dir).display());
    Ok(())
}
