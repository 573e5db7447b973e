//! slot-list-diff - reconcile an epoch's slot lists
//!
//! Compares the slots an archive claims were produced in an epoch (the
//! "faithful" list) with the slots a Solana RPC node reports through
//! `getBlocks`, and prints what each side has that the other lacks.

/// Epoch and slot arithmetic
pub mod epoch;

/// Canonical slot lists and list files
pub mod slot_list;

/// Paginated fetching against a block source
pub mod block_source;
pub mod solana_rpc_client;

pub mod reconcile;

pub mod compare;
pub mod config;
pub mod logging;
pub mod paths;

pub use block_source::{BlockSource, Commitment, FetchWindow, PaginatedFetcher};
pub use compare::{run, Comparison, RemoteOrigin};
pub use config::{Cli, Config, ConfigError};
pub use epoch::{epoch_of, epoch_range, Epoch, EpochRange, Slot, EPOCH_LEN};
pub use reconcile::{reconcile, Report, SideLabels};
pub use slot_list::{canonicalize, has_usable_content, SlotListError};
