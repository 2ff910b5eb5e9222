//! devnode CLI - start a local anvil-zksync node for CI jobs
//!
//! Inputs are read from `INPUT_*` environment variables as set by a workflow
//! step, or from the `[inputs]` section of an INI file given with `--inputs`.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use devnode::logging::ConsoleStream;

use error::CliError;
use runner::{CliRunner, RunnerOptions};

#[derive(Parser)]
#[command(name = "devnode")]
#[command(version = devnode::VERSION)]
#[command(about = "Provision, launch and health-check a local anvil-zksync node", long_about = None)]
struct Cli {
    /// Read inputs from an INI file (`[inputs]` section) instead of INPUT_* variables
    #[arg(long, global = true, value_name = "FILE")]
    inputs: Option<PathBuf>,

    /// Enable debug logging (also enabled by RUNNER_DEBUG=1)
    #[arg(long, global = true)]
    debug: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision, launch, and wait until the node answers (default)
    Up,

    /// Print the node command line without launching
    Args {
        /// Print one argument per line
        #[arg(long)]
        lines: bool,
    },

    /// Download the node binary, or reuse a cached one, and print its path
    Provision,

    /// Health-check a node that is already running
    Probe,

    /// Show the resolved inputs
    Config,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

impl Commands {
    /// Commands whose stdout is their result log to stderr instead.
    fn console(&self) -> ConsoleStream {
        match self {
            Commands::Args { .. } | Commands::Config => ConsoleStream::Stderr,
            Commands::Up | Commands::Provision | Commands::Probe => ConsoleStream::Stdout,
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let command = cli.command.unwrap_or(Commands::Up);
    let runner = CliRunner::new(RunnerOptions {
        inputs: cli.inputs,
        debug: cli.debug,
        log_file: cli.log_file,
        console: command.console(),
    })?;

    match command {
        Commands::Up => commands::up::run(&runner),
        Commands::Args { lines } => commands::args::run(&runner, lines),
        Commands::Provision => commands::provision::run(&runner),
        Commands::Probe => commands::probe::run(&runner),
        Commands::Config => commands::config::run(&runner),
    }
}
