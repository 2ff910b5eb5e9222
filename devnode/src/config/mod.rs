//! Launch configuration: input sources, resolution, and validation.
//!
//! Inputs flow through three steps:
//!
//! 1. A [`ConfigSource`] answers raw lookups by input name.
//! 2. [`InputResolver`] reads every option in [`NODE_OPTIONS`] and applies
//!    defaults, producing an immutable [`NodeConfig`].
//! 3. [`validate`] rejects configurations that cannot be launched.

mod error;
mod options;
mod record;
mod resolver;
mod source;
mod validate;

pub use error::ConfigError;
pub use options::{
    FlagShape, NodeMode, NodeOption, Stage, DEFAULT_HOST, DEFAULT_MODE, DEFAULT_PORT,
    DEFAULT_RELEASE_TAG, DEFAULT_TARGET, INPUT_EXTRA_ARGS, INPUT_FORK_URL, INPUT_FORWARD_OUTPUT,
    INPUT_HEALTH_CHECK_INTERVAL_MS, INPUT_HEALTH_CHECK_RETRIES, INPUT_HEALTH_CHECK_TIMEOUT_MS,
    INPUT_HEALTH_CHECK_WARMUP_MS, INPUT_HOST, INPUT_MODE, INPUT_PORT, INPUT_RELEASE_TAG,
    INPUT_TARGET, INPUT_VERBOSITY, NODE_OPTIONS,
};
pub use record::{
    HealthCheckSettings, NodeConfig, OptionValue, DEFAULT_HEALTH_CHECK_INTERVAL,
    DEFAULT_HEALTH_CHECK_RETRIES, DEFAULT_HEALTH_CHECK_TIMEOUT, DEFAULT_HEALTH_CHECK_WARMUP,
};
pub use resolver::InputResolver;
pub use source::{ActionsInputSource, ConfigSource, IniConfigSource, MapConfigSource, INPUTS_SECTION};
pub use validate::{validate, validate_port, MAX_PORT, MIN_PORT};
