//! Command-line and environment configuration

use crate::block_source::{Commitment, DEFAULT_PAGE_SIZE};
use crate::epoch::{Epoch, MAX_EPOCH};
use crate::paths;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Problems detected before any file or network work starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rpc endpoint not specified (use --rpc or SOLANA_RPC_URL)")]
    MissingEndpoint,
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    #[error("epoch {0} is out of range (maximum is {max})", max = MAX_EPOCH)]
    EpochOutOfRange(Epoch),
    #[error("file {0} does not exist or is empty")]
    UnusableReference(PathBuf),
}

#[derive(Parser, Debug)]
#[command(name = "slot-list-diff")]
#[command(about = "Compare an epoch's faithful slot list with a Solana RPC node's block list")]
pub struct Cli {
    /// The epoch to fetch blocks for
    #[arg(long, default_value_t = 0)]
    pub epoch: Epoch,

    /// The RPC endpoint to use
    #[arg(long, env = "SOLANA_RPC_URL")]
    pub rpc: Option<String>,

    /// The path to the faithful slot list file
    #[arg(long)]
    pub faithful: Option<PathBuf>,

    /// Root directory holding `faithful/` and `solana/` lists
    #[arg(long, env = "SLOT_LISTS_DIR", default_value = paths::DEFAULT_LISTS_DIR)]
    pub lists_dir: PathBuf,

    /// Commitment level blocks must have reached
    #[arg(long, value_enum, default_value_t = Commitment::Finalized)]
    pub commitment: Commitment,

    /// Slots per getBlocks request
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Fetch from RPC even if a cached list exists
    #[arg(long)]
    pub refresh: bool,
}

/// Validated run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub epoch: Epoch,
    pub rpc_url: String,
    pub lists_dir: PathBuf,
    pub reference_path: PathBuf,
    pub cache_path: PathBuf,
    pub commitment: Commitment,
    pub page_size: u64,
    pub timeout: Duration,
    pub refresh: bool,
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let rpc_url = cli
            .rpc
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingEndpoint)?;
        if cli.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if cli.epoch > MAX_EPOCH {
            return Err(ConfigError::EpochOutOfRange(cli.epoch));
        }

        let reference_path = cli
            .faithful
            .unwrap_or_else(|| paths::reference_list_path(&cli.lists_dir, cli.epoch));
        let cache_path = paths::cache_list_path(&cli.lists_dir, cli.epoch);

        Ok(Config {
            epoch: cli.epoch,
            rpc_url,
            lists_dir: cli.lists_dir,
            reference_path,
            cache_path,
            commitment: cli.commitment,
            page_size: cli.page_size,
            timeout: Duration::from_secs(cli.timeout_secs),
            refresh: cli.refresh,
        })
    }
}
