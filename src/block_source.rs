//! Paginated block fetching
//!
//! Remote nodes cap how many slots a single `getBlocks` call may span, so an
//! epoch is walked in fixed-size windows. Windows are requested one at a
//! time, in slot order, and the first failing window aborts the whole fetch.

use crate::epoch::Slot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Widest window a single request may cover
pub const DEFAULT_PAGE_SIZE: u64 = 1000;

/// Finality level a block must reach to be listed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    #[default]
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can list the produced slots in an inclusive range
#[async_trait]
pub trait BlockSource {
    /// Produced slots in `[start, end]` at the given commitment
    async fn get_blocks(
        &self,
        start: Slot,
        end: Slot,
        commitment: Commitment,
    ) -> Result<Vec<Slot>>;

    /// Highest slot the source has reached at `commitment`, if it can tell
    async fn latest_slot(&self, _commitment: Commitment) -> Result<Option<Slot>> {
        Ok(None)
    }
}

/// One inclusive request range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: Slot,
    pub end: Slot,
}

impl FetchWindow {
    /// Split `[start, end]` into consecutive windows of at most `page_size` slots
    ///
    /// The last window may be shorter. Returns nothing when `start > end`.
    pub fn split(start: Slot, end: Slot, page_size: u64) -> Result<Vec<FetchWindow>> {
        if page_size == 0 {
            anyhow::bail!("page size must be greater than zero");
        }

        let mut windows = Vec::new();
        let mut cursor = start;
        while cursor <= end {
            let window_end = cursor.saturating_add(page_size - 1).min(end);
            windows.push(FetchWindow {
                start: cursor,
                end: window_end,
            });
            match window_end.checked_add(1) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        Ok(windows)
    }

    /// Number of slots covered
    pub fn width(&self) -> u64 {
        self.end - self.start + 1
    }
}

impl fmt::Display for FetchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {}", self.start, self.end)
    }
}

/// Drives a [`BlockSource`] across a slot range window by window
#[derive(Debug, Clone)]
pub struct PaginatedFetcher {
    page_size: u64,
    commitment: Commitment,
}

impl Default for PaginatedFetcher {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            commitment: Commitment::default(),
        }
    }
}

impl PaginatedFetcher {
    pub fn new(page_size: u64, commitment: Commitment) -> Self {
        Self {
            page_size,
            commitment,
        }
    }

    /// Fetch every window of `[start, end]`
    ///
    /// Returns the raw per-window results in window order. Nothing is
    /// returned if any window fails.
    pub async fn fetch_all<S>(&self, source: &S, start: Slot, end: Slot) -> Result<Vec<Vec<Slot>>>
    where
        S: BlockSource + ?Sized + Sync,
    {
        let windows = FetchWindow::split(start, end, self.page_size)?;
        let total = windows.len();
        let mut out = Vec::with_capacity(total);

        for (idx, window) in windows.into_iter().enumerate() {
            let started_at = Instant::now();
            let blocks = source
                .get_blocks(window.start, window.end, self.commitment)
                .await
                .with_context(|| format!("failed to fetch blocks between {}", window))?;
            tracing::info!(
                "{}/{} · Fetched {} blocks between {} in {:?}",
                idx + 1,
                total,
                blocks.len(),
                window,
                started_at.elapsed()
            );
            out.push(blocks);
        }

        Ok(out)
    }
}
