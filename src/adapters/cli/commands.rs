//! CLI Command Definitions
//!
//! Argument parsing for the twap-catalog tool, using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// twap-catalog - token catalog tool for TWAP trading front-ends
#[derive(Parser, Debug)]
#[command(
    name = "twap-catalog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Fetch, sort and filter per-chain token catalogs",
    long_about = "twap-catalog fetches a chain's remote token list, normalizes it into a \
                  canonical catalog ordered by the chain's priority set, and exposes the \
                  filtering and balance resolution a token selector needs."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the configured chains
    Chains(ChainsCmd),

    /// Fetch and print a chain's catalog
    Fetch(FetchCmd),

    /// Filter a chain's catalog by symbol or address
    Search(SearchCmd),

    /// Show the top of a chain's catalog with an account's balances
    Balances(BalancesCmd),
}

/// List configured chains
#[derive(Parser, Debug)]
pub struct ChainsCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// Fetch a chain's catalog
#[derive(Parser, Debug)]
pub struct FetchCmd {
    /// Chain id (e.g. 137 for Polygon)
    #[arg(value_name = "CHAIN_ID")]
    pub chain: u64,

    /// Maximum rows to print (0 = all)
    #[arg(short, long, value_name = "N", default_value = "20")]
    pub limit: usize,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// Search a chain's catalog
#[derive(Parser, Debug)]
pub struct SearchCmd {
    /// Chain id (e.g. 137 for Polygon)
    #[arg(value_name = "CHAIN_ID")]
    pub chain: u64,

    /// Symbol substring or exact address
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// Show catalog rows with balances
#[derive(Parser, Debug)]
pub struct BalancesCmd {
    /// Chain id (e.g. 137 for Polygon)
    #[arg(value_name = "CHAIN_ID")]
    pub chain: u64,

    /// Account address to resolve balances for
    #[arg(value_name = "ACCOUNT")]
    pub account: String,

    /// Number of rows to resolve
    #[arg(short, long, value_name = "N", default_value = "10")]
    pub limit: usize,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}
