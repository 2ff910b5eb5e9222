//! Show the resolved inputs.
//!
//! Only inputs that are set (or defaulted) are listed; switches appear with
//! `true` or `false`.

use crate::error::CliError;
use crate::runner::CliRunner;

pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    let entries = runner.config().entries();
    let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    println!("[inputs]");
    for (name, value) in entries {
        println!("  {:<width$} = {}", name, value, width = width);
    }
    Ok(())
}
