//! One reconciliation run
//!
//! Uses the cached RPC list when one is on disk; otherwise walks the epoch
//! through the block source, caches the result and then compares. The cache
//! is written only after every window has been fetched.

use crate::block_source::{BlockSource, PaginatedFetcher};
use crate::config::{Config, ConfigError};
use crate::epoch::{fetch_bounds, EpochRange, Slot};
use crate::paths::{display_abs, ensure_cache_dir};
use crate::reconcile::{reconcile, Report};
use crate::slot_list::{self, flatten_windows, has_usable_content};
use anyhow::{Context, Result};
use std::time::Instant;

/// Where the remote list of a run came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOrigin {
    /// Loaded from a previous run's cache file
    Cache,
    /// Fetched from the block source during this run
    Fetched,
}

/// Report plus how the remote side was obtained
#[derive(Debug, Clone)]
pub struct Comparison {
    pub report: Report,
    pub origin: RemoteOrigin,
}

/// Run one comparison for `config.epoch`
pub async fn run<S>(config: &Config, source: &S) -> Result<Comparison>
where
    S: BlockSource + ?Sized + Sync,
{
    let range = EpochRange::of(config.epoch);
    tracing::info!("Epoch {}: {}", config.epoch, range);

    ensure_cache_dir(&config.lists_dir)?;

    tracing::info!(
        "Going to compare the list of slots for epoch {} from {} with the list from solana rpc.",
        config.epoch,
        display_abs(&config.reference_path).display()
    );
    if !has_usable_content(&config.reference_path) {
        return Err(ConfigError::UnusableReference(config.reference_path.clone()).into());
    }

    let (reference, remote, origin) =
        if !config.refresh && has_usable_content(&config.cache_path) {
            tracing::info!(
                "Comparing {} with {}",
                display_abs(&config.reference_path).display(),
                display_abs(&config.cache_path).display()
            );
            let reference = slot_list::load(&config.reference_path)?;
            let remote = slot_list::load(&config.cache_path)?;
            (reference, remote, RemoteOrigin::Cache)
        } else {
            let remote = fetch_epoch(config, source).await?;
            slot_list::save(&config.cache_path, &remote)?;
            tracing::info!(
                "Saved slot list for epoch {} (from solana rpc) to {}",
                config.epoch,
                display_abs(&config.cache_path).display()
            );
            let reference = slot_list::load(&config.reference_path)?;
            (reference, remote, RemoteOrigin::Fetched)
        };

    let report = reconcile(reference, remote, config.epoch);
    tracing::info!(
        only_in_reference = report.only_in_a.len(),
        only_in_remote = report.only_in_b.len(),
        "reconciled epoch {}",
        config.epoch
    );
    Ok(Comparison { report, origin })
}

/// Fetch and canonicalize every produced slot of the epoch, plus the boundary slot before it
async fn fetch_epoch<S>(config: &Config, source: &S) -> Result<Vec<Slot>>
where
    S: BlockSource + ?Sized + Sync,
{
    let (start, end) = fetch_bounds(config.epoch);

    match source.latest_slot(config.commitment).await {
        Ok(Some(tip)) if tip < end => tracing::warn!(
            "node is at slot {} ({}), epoch {} ends at {}; the fetched list will be incomplete",
            tip,
            config.commitment,
            config.epoch,
            end
        ),
        Ok(_) => {}
        Err(e) => tracing::warn!("could not read current slot: {:#}", e),
    }

    let fetcher = PaginatedFetcher::new(config.page_size, config.commitment);
    let started_at = Instant::now();
    let windows = fetcher
        .fetch_all(source, start, end)
        .await
        .with_context(|| format!("failed to fetch slot list for epoch {}", config.epoch))?;
    let slots = flatten_windows(windows);
    tracing::info!(
        "Fetched {} slots for epoch {} in {:.1}s",
        slots.len(),
        config.epoch,
        started_at.elapsed().as_secs_f64()
    );
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_source::Commitment;
    use crate::epoch::Slot;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Serves a fixed set of slots; counts requests
    struct FixedSource {
        slots: Vec<Slot>,
        requests: AtomicUsize,
    }

    impl FixedSource {
        fn new(slots: Vec<Slot>) -> Self {
            Self {
                slots,
                requests: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BlockSource for FixedSource {
        async fn get_blocks(&self, start: Slot, end: Slot, _: Commitment) -> Result<Vec<Slot>> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .slots
                .iter()
                .copied()
                .filter(|s| (start..=end).contains(s))
                .collect())
        }
    }

    fn config(root: &Path, epoch: u64) -> Config {
        Config {
            epoch,
            rpc_url: "http://localhost:8899".to_string(),
            lists_dir: root.to_path_buf(),
            reference_path: crate::paths::reference_list_path(root, epoch),
            cache_path: crate::paths::cache_list_path(root, epoch),
            commitment: Commitment::Finalized,
            page_size: 50_000,
            timeout: Duration::from_secs(1),
            refresh: false,
        }
    }

    fn write_reference(config: &Config, content: &str) {
        std::fs::create_dir_all(config.reference_path.parent().unwrap()).unwrap();
        std::fs::write(&config.reference_path, content).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_then_cache() {
        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path(), 1);
        write_reference(&config, "432000\n432001\n");
        let source = FixedSource::new(vec![431_999, 432_001, 432_000, 432_002]);

        let first = run(&config, &source).await.unwrap();
        assert_eq!(first.origin, RemoteOrigin::Fetched);
        assert_eq!(first.report.only_in_b, vec![432_002]);
        assert!(first.report.only_in_a.is_empty());
        // boundary slot is cached but filtered out of the comparison
        assert_eq!(
            std::fs::read_to_string(&config.cache_path).unwrap(),
            "431999\n432000\n432001\n432002\n"
        );
        let fetched = source.requests.load(Ordering::SeqCst);
        assert_eq!(fetched, 9);

        let second = run(&config, &source).await.unwrap();
        assert_eq!(second.origin, RemoteOrigin::Cache);
        assert_eq!(second.report, first.report);
        assert_eq!(source.requests.load(Ordering::SeqCst), fetched);
    }

    #[tokio::test]
    async fn test_refresh_ignores_cache() {
        let tmp = TempDir::new().unwrap();
        let mut config = config(tmp.path(), 0);
        write_reference(&config, "5\n");
        ensure_cache_dir(tmp.path()).unwrap();
        std::fs::write(&config.cache_path, "5\n6\n").unwrap();
        config.refresh = true;

        let source = FixedSource::new(vec![5]);
        let comparison = run(&config, &source).await.unwrap();
        assert_eq!(comparison.origin, RemoteOrigin::Fetched);
        assert!(comparison.report.is_identical());
        assert_eq!(std::fs::read_to_string(&config.cache_path).unwrap(), "5\n");
    }

    #[tokio::test]
    async fn test_empty_cache_file_is_refetched() {
        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path(), 0);
        write_reference(&config, "5\n");
        ensure_cache_dir(tmp.path()).unwrap();
        std::fs::write(&config.cache_path, "").unwrap();

        let source = FixedSource::new(vec![5]);
        let comparison = run(&config, &source).await.unwrap();
        assert_eq!(comparison.origin, RemoteOrigin::Fetched);
        assert!(source.requests.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn test_empty_reference_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path(), 0);
        write_reference(&config, "");

        let source = FixedSource::new(vec![5]);
        let err = run(&config, &source).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::UnusableReference(_))
        ));
        assert_eq!(source.requests.load(Ordering::SeqCst), 0);
    }
}
