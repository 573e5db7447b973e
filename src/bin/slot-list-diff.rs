//! slot-list-diff CLI
//!
//! Compares `lists/faithful/{epoch}.slots.txt` with the slots a Solana RPC
//! node lists for the same epoch, caching the RPC list under `lists/solana/`.

use anyhow::Result;
use clap::Parser;
use slot_list_diff::solana_rpc_client::{RpcConfig, SolanaRpcClient};
use slot_list_diff::{logging, Cli, Config, SideLabels};

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env (RPC endpoint, lists dir); must be loaded before clap reads env
    let _ = dotenvy::dotenv();
    logging::init();

    let config = Config::try_from(Cli::parse())?;

    let rpc = SolanaRpcClient::new(RpcConfig {
        url: config.rpc_url.clone(),
        timeout: config.timeout,
    })?;

    let comparison = slot_list_diff::run(&config, &rpc).await?;
    print!("{}", comparison.report.render(SideLabels::default()));

    Ok(())
}
