//! CLI Adapter
//!
//! Command-line interface for the twap-catalog tool.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{BalancesCmd, ChainsCmd, CliApp, Command, FetchCmd, SearchCmd};
