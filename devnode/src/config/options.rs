//! The option table.
//!
//! Every input that is forwarded to the node is described here once: the
//! name it is read under, the command-line flag it becomes, and the shape of
//! that flag. Both the resolver and the argument builder walk this table in
//! order, so the position of an entry is also the position of its flag on the
//! command line.

use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

/// Input carrying the release tag of the node binary.
pub const INPUT_RELEASE_TAG: &str = "releaseTag";
/// Input carrying the platform target used to pick a release asset.
pub const INPUT_TARGET: &str = "target";
/// Input selecting `run` or `fork`.
pub const INPUT_MODE: &str = "mode";
/// Input carrying the RPC port.
pub const INPUT_PORT: &str = "port";
/// Input carrying the RPC host.
pub const INPUT_HOST: &str = "host";
/// Input carrying the URL to fork from.
pub const INPUT_FORK_URL: &str = "forkUrl";
/// Input carrying the verbosity level.
pub const INPUT_VERBOSITY: &str = "verbosity";
/// Input carrying free-form extra arguments.
pub const INPUT_EXTRA_ARGS: &str = "extra-args";
/// Input enabling forwarding of the node's stdout/stderr into the job log.
pub const INPUT_FORWARD_OUTPUT: &str = "forwardOutput";
/// Input overriding the delay before the first health check, in milliseconds.
pub const INPUT_HEALTH_CHECK_WARMUP_MS: &str = "healthCheckWarmupMs";
/// Input overriding the delay between health checks, in milliseconds.
pub const INPUT_HEALTH_CHECK_INTERVAL_MS: &str = "healthCheckIntervalMs";
/// Input overriding the number of health check attempts.
pub const INPUT_HEALTH_CHECK_RETRIES: &str = "healthCheckRetries";
/// Input overriding the per-attempt health check timeout, in milliseconds.
pub const INPUT_HEALTH_CHECK_TIMEOUT_MS: &str = "healthCheckTimeoutMs";

/// Default release tag.
pub const DEFAULT_RELEASE_TAG: &str = "latest";
/// Default platform target.
pub const DEFAULT_TARGET: &str = "x86_64-unknown-linux-gnu";
/// Default launch mode.
pub const DEFAULT_MODE: &str = "run";
/// Default RPC port.
pub const DEFAULT_PORT: &str = "8011";
/// Default RPC host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// How the node is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMode {
    /// Start from genesis.
    Run,
    /// Start from the state of a remote chain.
    Fork,
}

impl NodeMode {
    /// All supported modes.
    pub const ALL: [NodeMode; 2] = [NodeMode::Run, NodeMode::Fork];

    /// The subcommand token for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeMode::Run => "run",
            NodeMode::Fork => "fork",
        }
    }

    /// Names of all supported modes.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(NodeMode::as_str).collect()
    }
}

impl fmt::Display for NodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "run" => Ok(NodeMode::Run),
            "fork" => Ok(NodeMode::Fork),
            _ => Err(ConfigError::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Shape of the command-line flag an option becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagShape {
    /// `--flag <value>`, emitted when a value is present.
    Value,
    /// `--flag`, emitted when the input is `"true"`.
    Switch,
    /// One token of the flag character repeated `level + 1` times.
    Repeat,
    /// Whitespace-separated tokens passed through verbatim.
    Raw,
}

/// Where on the command line an option belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Before the mode subcommand.
    Global,
    /// After the `fork` subcommand, only in fork mode.
    Fork,
}

/// One forwarded option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeOption {
    /// Input name the value is read under.
    pub input: &'static str,
    /// Flag text. For [`FlagShape::Repeat`] this is the repeated character;
    /// for [`FlagShape::Raw`] it is empty.
    pub flag: &'static str,
    /// Flag shape.
    pub shape: FlagShape,
    /// Command-line stage.
    pub stage: Stage,
}

impl NodeOption {
    const fn value(input: &'static str, flag: &'static str) -> Self {
        Self {
            input,
            flag,
            shape: FlagShape::Value,
            stage: Stage::Global,
        }
    }

    const fn switch(input: &'static str, flag: &'static str) -> Self {
        Self {
            input,
            flag,
            shape: FlagShape::Switch,
            stage: Stage::Global,
        }
    }

    const fn fork(input: &'static str, flag: &'static str) -> Self {
        Self {
            input,
            flag,
            shape: FlagShape::Value,
            stage: Stage::Fork,
        }
    }

    /// Look up an option by input name.
    pub fn find(input: &str) -> Option<&'static NodeOption> {
        NODE_OPTIONS.iter().find(|option| option.input == input)
    }
}

/// All forwarded options in command-line order.
pub const NODE_OPTIONS: &[NodeOption] = &[
    NodeOption::switch("offline", "--offline"),
    NodeOption::switch("healthCheckEndpoint", "--health-check-endpoint"),
    NodeOption::value("configOut", "--config-out"),
    NodeOption::value("protocolVersion", "--protocol-version"),
    // Network
    NodeOption::value(INPUT_PORT, "--port"),
    NodeOption::value(INPUT_HOST, "--host"),
    NodeOption::value("chainId", "--chain-id"),
    NodeOption::value("blockTime", "--block-time"),
    // Debug output
    NodeOption::value("showStorageLogs", "--show-storage-logs"),
    NodeOption::value("showVmDetails", "--show-vm-details"),
    NodeOption::value("showGasDetails", "--show-gas-details"),
    // Gas pricing
    NodeOption::value("l1GasPrice", "--l1-gas-price"),
    NodeOption::value("l2GasPrice", "--l2-gas-price"),
    NodeOption::value("l1PubdataPrice", "--l1-pubdata-price"),
    NodeOption::value("priceScaleFactor", "--price-scale-factor"),
    NodeOption::value("limitScaleFactor", "--limit-scale-factor"),
    // System contracts
    NodeOption::value("overrideBytecodesDir", "--override-bytecodes-dir"),
    NodeOption::value("devSystemContracts", "--dev-system-contracts"),
    NodeOption::switch("evmInterpreter", "--evm-interpreter"),
    // Logging
    NodeOption::value("log", "--log"),
    NodeOption::value("logFilePath", "--log-file-path"),
    // Cache
    NodeOption::value("cache", "--cache"),
    NodeOption::switch("resetCache", "--reset-cache"),
    NodeOption::value("cacheDir", "--cache-dir"),
    // Accounts
    NodeOption::value("accounts", "--accounts"),
    NodeOption::value("balance", "--balance"),
    NodeOption::value("mnemonic", "--mnemonic"),
    NodeOption::value("mnemonicRandom", "--mnemonic-random"),
    NodeOption::value("mnemonicSeedUnsafe", "--mnemonic-seed-unsafe"),
    NodeOption::value("derivationPath", "--derivation-path"),
    NodeOption::switch("autoImpersonate", "--auto-impersonate"),
    // System and bytecode
    NodeOption::switch("enforceBytecodeCompression", "--enforce-bytecode-compression"),
    NodeOption::value("systemContractsPath", "--system-contracts-path"),
    // Debugging and verbosity
    NodeOption::switch("showNodeConfig", "--show-node-config"),
    NodeOption {
        input: INPUT_VERBOSITY,
        flag: "-",
        shape: FlagShape::Repeat,
        stage: Stage::Global,
    },
    // State snapshots
    NodeOption::value("timestamp", "--timestamp"),
    NodeOption::value("init", "--init"),
    NodeOption::value("state", "--state"),
    NodeOption::value("stateInterval", "--state-interval"),
    NodeOption::value("dumpState", "--dump-state"),
    NodeOption::switch("preserveHistoricalStates", "--preserve-historical-states"),
    NodeOption::value("loadState", "--load-state"),
    // Mining and server
    NodeOption::switch("noMining", "--no-mining"),
    NodeOption::value("allowOrigin", "--allow-origin"),
    NodeOption::switch("noCors", "--no-cors"),
    NodeOption::value("order", "--order"),
    // L1
    NodeOption::value("spawnL1", "--spawn-l1"),
    NodeOption::value("externalL1", "--external-l1"),
    NodeOption::switch("autoExecuteL1", "--auto-execute-l1"),
    // Custom base token
    NodeOption::value("baseTokenSymbol", "--base-token-symbol"),
    NodeOption::value("baseTokenRatio", "--base-token-ratio"),
    NodeOption {
        input: INPUT_EXTRA_ARGS,
        flag: "",
        shape: FlagShape::Raw,
        stage: Stage::Global,
    },
    // Fork source, emitted after the `fork` token
    NodeOption::fork(INPUT_FORK_URL, "--fork-url"),
    NodeOption::fork("forkBlockNumber", "--fork-block-number"),
    NodeOption::fork("forkTransactionHash", "--fork-transaction-hash"),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_input_names_are_unique() {
        let mut seen = HashSet::new();
        for option in NODE_OPTIONS {
            assert!(seen.insert(option.input), "duplicate input {}", option.input);
        }
    }

    #[test]
    fn test_value_and_switch_flags_are_kebab_case() {
        for option in NODE_OPTIONS
            .iter()
            .filter(|o| matches!(o.shape, FlagShape::Value | FlagShape::Switch))
        {
            assert!(option.flag.starts_with("--"), "{}", option.flag);
            assert!(
                option.flag[2..]
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "{} is not kebab-case",
                option.flag
            );
        }
    }

    #[test]
    fn test_fork_options_trail_global_options() {
        let first_fork = NODE_OPTIONS
            .iter()
            .position(|o| o.stage == Stage::Fork)
            .unwrap();
        assert!(NODE_OPTIONS[first_fork..]
            .iter()
            .all(|o| o.stage == Stage::Fork));
    }

    #[test]
    fn test_find_option() {
        let option = NodeOption::find("init").unwrap();
        assert_eq!(option.flag, "--init");
        assert!(NodeOption::find("releaseTag").is_none());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("run".parse::<NodeMode>().unwrap(), NodeMode::Run);
        assert_eq!("fork".parse::<NodeMode>().unwrap(), NodeMode::Fork);
        assert_eq!(
            "replay".parse::<NodeMode>().unwrap_err(),
            ConfigError::InvalidMode {
                mode: "replay".to_string()
            }
        );
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(NodeMode::names(), vec!["run", "fork"]);
        assert_eq!(NodeMode::Fork.to_string(), "fork");
    }
}
