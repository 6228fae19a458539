//! twap-catalog - Chain-Aware Token Catalog Tool
//!
//! Fetches, sorts and filters per-chain token catalogs, and resolves
//! selector-row balances over JSON-RPC.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use twap_catalog::adapters::cli::{BalancesCmd, ChainsCmd, CliApp, Command, FetchCmd, SearchCmd};
use twap_catalog::adapters::rpc_balance::EvmRpcBalances;
use twap_catalog::adapters::token_list::HttpTokenSource;
use twap_catalog::application::{CatalogService, TokenSelector};
use twap_catalog::config::{load_config, Config};
use twap_catalog::domain::{filter, Address, Catalog, CatalogEntry, ListWindow};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (RUST_LOG and endpoint overrides go here)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug);

    match app.command {
        Command::Chains(cmd) => chains_command(cmd),
        Command::Fetch(cmd) => fetch_command(cmd).await,
        Command::Search(cmd) => search_command(cmd).await,
        Command::Balances(cmd) => balances_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt().with_env_filter(filter).init();
}

fn load(path: &std::path::Path) -> Result<Config> {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
    load_config(&expanded).with_context(|| format!("Failed to load configuration from {expanded}"))
}

fn build_service(config: &Config) -> Result<CatalogService<HttpTokenSource>> {
    let source = HttpTokenSource::new(config.token_list_config())
        .context("Failed to create token-list client")?;
    Ok(CatalogService::new(Arc::new(source), config.chain_specs()))
}

fn chains_command(cmd: ChainsCmd) -> Result<()> {
    let config = load(&cmd.config)?;

    for chain in &config.chains {
        println!(
            "{:>8}  {:<12} native {:<6} {}",
            chain.chain_id, chain.name, chain.native.symbol, chain.token_list_url
        );
    }
    Ok(())
}

async fn fetch_command(cmd: FetchCmd) -> Result<()> {
    let config = load(&cmd.config)?;
    let service = build_service(&config)?;

    let catalog = service
        .get_catalog(cmd.chain)
        .await
        .context("Failed to fetch catalog")?;

    println!(
        "Catalog for chain {} ({} tokens, fetched {})",
        catalog.chain_id,
        catalog.len(),
        catalog.fetched_at.format("%H:%M:%S")
    );
    print_entries(catalog.entries(), cmd.limit);
    Ok(())
}

async fn search_command(cmd: SearchCmd) -> Result<()> {
    let config = load(&cmd.config)?;
    let service = build_service(&config)?;

    let catalog = service
        .get_catalog(cmd.chain)
        .await
        .context("Failed to fetch catalog")?;

    let matches = filter(catalog.entries(), &cmd.query);
    if matches.is_empty() {
        println!("no tokens");
        return Ok(());
    }

    for entry in matches {
        print_token_line(entry);
    }
    Ok(())
}

async fn balances_command(cmd: BalancesCmd) -> Result<()> {
    let config = load(&cmd.config)?;
    let service = build_service(&config)?;
    let balances = EvmRpcBalances::new(config.rpc_balance_config())
        .context("Failed to create balance client")?;

    let catalog: Arc<Catalog> = service
        .get_catalog(cmd.chain)
        .await
        .context("Failed to fetch catalog")?;

    let window = ListWindow::default();
    let viewport_height = window.row_height() * cmd.limit.max(1) as u32;
    let (mut selector, mut updates) = TokenSelector::new(
        catalog,
        Address::new(cmd.account),
        Arc::new(balances),
        ListWindow::new(window.row_height(), 0),
    );

    // First pass spawns one lookup per visible row; drain exactly that many
    // updates before rendering again.
    let pending = selector
        .rows(0, viewport_height)
        .iter()
        .filter(|row| row.balance.is_loading())
        .count();
    for _ in 0..pending {
        match updates.recv().await {
            Some(update) => {
                selector.apply_update(update);
            }
            None => break,
        }
    }

    let rows = selector.rows(0, viewport_height);
    if rows.is_empty() {
        println!("no tokens");
        return Ok(());
    }
    for row in rows {
        println!("{:<12} {:>18}", row.token.symbol, row.balance.display());
    }
    Ok(())
}

fn print_entries(entries: &[CatalogEntry], limit: usize) {
    let shown = if limit == 0 { entries.len() } else { limit.min(entries.len()) };
    for entry in &entries[..shown] {
        print_token_line(entry);
    }
    if shown < entries.len() {
        println!("... and {} more", entries.len() - shown);
    }
}

fn print_token_line(entry: &CatalogEntry) {
    println!(
        "{:<12} {:>3}  {}",
        entry.token.symbol, entry.token.decimals, entry.token.address
    );
}
