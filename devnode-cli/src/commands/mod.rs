//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`up`] - Provision, launch, and wait for the node (default)
//! - [`args`] - Print the node command line without launching
//! - [`provision`] - Download or reuse the node binary
//! - [`probe`] - Health-check an already running node
//! - [`config`] - Show the resolved inputs

pub mod args;
pub mod config;
pub mod probe;
pub mod provision;
pub mod up;
