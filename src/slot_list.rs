//! Slot lists: canonical form, membership and flat-file storage
//!
//! A slot list file holds one decimal slot per line. Files are not trusted
//! to be sorted or duplicate-free, so every load canonicalizes.

use crate::epoch::{epoch_of, Epoch, Slot};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or writing a slot list file
#[derive(Debug, Error)]
pub enum SlotListError {
    #[error("slot list not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read slot list {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid slot {content:?} at {}:{line}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
        #[source]
        source: ParseIntError,
    },
    #[error("failed to write slot list {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Sort ascending and drop duplicates
pub fn canonicalize(mut slots: Vec<Slot>) -> Vec<Slot> {
    slots.sort_unstable();
    slots.dedup();
    slots
}

/// Whether a canonical list contains `slot` (lower-bound binary search)
pub fn contains(sorted: &[Slot], slot: Slot) -> bool {
    let i = sorted.partition_point(|s| *s < slot);
    i < sorted.len() && sorted[i] == slot
}

/// Keep only the slots owned by `epoch`
pub fn retain_epoch(mut slots: Vec<Slot>, epoch: Epoch) -> Vec<Slot> {
    slots.retain(|slot| epoch_of(*slot) == epoch);
    slots
}

/// Merge per-window fetch results into one canonical list
pub fn flatten_windows(windows: Vec<Vec<Slot>>) -> Vec<Slot> {
    canonicalize(windows.into_iter().flatten().collect())
}

/// Whether `path` exists and is non-empty
///
/// A missing file and a zero-byte file are both "not usable": the first was
/// never written, the second was written by a run that produced nothing.
pub fn has_usable_content(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.len() > 0)
        .unwrap_or(false)
}

/// Load a slot list file and return it canonicalized
pub fn load(path: &Path) -> Result<Vec<Slot>, SlotListError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            SlotListError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            SlotListError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let mut slots = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| SlotListError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let slot = trimmed
            .parse::<Slot>()
            .map_err(|source| SlotListError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                content: trimmed.to_string(),
                source,
            })?;
        slots.push(slot);
    }

    Ok(canonicalize(slots))
}

/// Write `slots` one per line, in the order given
pub fn save(path: &Path, slots: &[Slot]) -> Result<(), SlotListError> {
    let write_err = |source: std::io::Error| SlotListError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    for slot in slots {
        writeln!(writer, "{}", slot).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;
    Ok(())
}
