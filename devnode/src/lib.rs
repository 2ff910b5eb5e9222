//! devnode - start a local anvil-zksync node for CI jobs
//!
//! This library resolves launch inputs, downloads and caches the
//! `anvil-zksync` binary from its GitHub releases, starts it detached, and
//! waits until it answers JSON-RPC requests.
//!
//! # High-Level API
//!
//! ```ignore
//! use devnode::config::{ActionsInputSource, InputResolver};
//! use devnode::launcher::DefaultLauncher;
//!
//! let config = InputResolver::new(ActionsInputSource::new()).resolve();
//! let launcher = DefaultLauncher::from_env()?;
//! let report = launcher.run(&config).await?;
//! println!("node ready on {}", report.endpoint());
//! ```

pub mod args;
pub mod config;
pub mod launcher;
pub mod log;
pub mod logging;
pub mod probe;
pub mod process;
pub mod provision;

/// Version of the devnode library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the provisioned tool: its cache key and executable name.
pub const TOOL_NAME: &str = "anvil-zksync";
