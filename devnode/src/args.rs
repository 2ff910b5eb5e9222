//! Command-line construction for the node binary.
//!
//! [`build`] walks [`NODE_OPTIONS`] in table order and serializes each
//! present option according to its [`FlagShape`]. The mode subcommand always
//! comes last, followed by the fork-source flags when forking. Output depends
//! only on the record, so the same record always yields the same tokens.

use crate::config::{FlagShape, NodeConfig, NodeMode, Stage, NODE_OPTIONS};

/// Build the ordered argument list for a validated configuration.
pub fn build(config: &NodeConfig) -> Vec<String> {
    let mut args = Vec::new();

    for option in NODE_OPTIONS.iter().filter(|o| o.stage == Stage::Global) {
        match option.shape {
            FlagShape::Value => {
                if let Some(value) = config.text(option.input) {
                    args.push(option.flag.to_string());
                    args.push(value.to_string());
                }
            }
            FlagShape::Switch => {
                if config.switch(option.input) {
                    args.push(option.flag.to_string());
                }
            }
            FlagShape::Repeat => {
                if let Some(token) = repeat_token(option.flag, config.verbosity()) {
                    args.push(token);
                }
            }
            FlagShape::Raw => {
                if let Some(raw) = config.text(option.input) {
                    args.extend(split_raw(raw));
                }
            }
        }
    }

    if config.is_fork() {
        args.push(NodeMode::Fork.as_str().to_string());
        for option in NODE_OPTIONS.iter().filter(|o| o.stage == Stage::Fork) {
            if let Some(value) = config.text(option.input) {
                args.push(option.flag.to_string());
                args.push(value.to_string());
            }
        }
    } else {
        args.push(NodeMode::Run.as_str().to_string());
    }

    tracing::debug!("Constructed command-line arguments: {}", args.join(" "));
    args
}

/// A single token of `flag` repeated `level + 1` times, or nothing at level 0.
pub fn repeat_token(flag: &str, level: u8) -> Option<String> {
    if level == 0 {
        return None;
    }
    Some(flag.repeat(usize::from(level) + 1))
}

/// Split free-form argument text on whitespace.
pub fn split_raw(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split_whitespace().map(str::to_string)
}

/// Render an argument list for logs.
pub fn display(args: &[String]) -> String {
    args.join(" ")
}
