//! Where slot lists live on disk
//!
//! ```text
//! lists/
//!   faithful/{epoch}.slots.txt        reference lists (provided)
//!   solana/{epoch}.slots.txt-solana   cached RPC results (written by us)
//! ```

use crate::epoch::Epoch;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default root for both list directories
pub const DEFAULT_LISTS_DIR: &str = "lists";

/// Directory of reference lists
pub fn reference_dir(lists_dir: &Path) -> PathBuf {
    lists_dir.join("faithful")
}

/// Directory of cached RPC lists
pub fn cache_dir(lists_dir: &Path) -> PathBuf {
    lists_dir.join("solana")
}

/// Default reference list for `epoch`
pub fn reference_list_path(lists_dir: &Path, epoch: Epoch) -> PathBuf {
    reference_dir(lists_dir).join(format!("{}.slots.txt", epoch))
}

/// Cached RPC list for `epoch`
pub fn cache_list_path(lists_dir: &Path, epoch: Epoch) -> PathBuf {
    cache_dir(lists_dir).join(format!("{}.slots.txt-solana", epoch))
}

/// Create the cache directory if it does not exist yet
pub fn ensure_cache_dir(lists_dir: &Path) -> Result<PathBuf> {
    let dir = cache_dir(lists_dir);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("could not create dir {}", dir.display()))?;
    Ok(dir)
}

/// Absolute form of `path` for messages; the path as given if the CWD is gone
pub fn display_abs(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_paths() {
        let root = Path::new("lists");
        assert_eq!(
            reference_list_path(root, 512),
            PathBuf::from("lists/faithful/512.slots.txt")
        );
        assert_eq!(
            cache_list_path(root, 512),
            PathBuf::from("lists/solana/512.slots.txt-solana")
        );
    }

    #[test]
    fn test_ensure_cache_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = ensure_cache_dir(tmp.path()).unwrap();
        assert!(dir.is_dir());
        ensure_cache_dir(tmp.path()).unwrap();
    }

    #[test]
    fn test_display_abs() {
        assert!(display_abs(Path::new("lists/x")).is_absolute());
    }
}
