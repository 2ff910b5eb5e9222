//! Dry run: print the node command line.

use devnode::args;
use devnode::config::validate;

use crate::error::CliError;
use crate::runner::CliRunner;

pub fn run(runner: &CliRunner, one_per_line: bool) -> Result<(), CliError> {
    let config = runner.config();
    validate(config)?;

    let args = args::build(config);
    if one_per_line {
        for arg in &args {
            println!("{}", arg);
        }
    } else {
        println!("{}", args::display(&args));
    }
    Ok(())
}
