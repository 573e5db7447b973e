//! Epoch arithmetic
//!
//! Maps an epoch number to the inclusive slot range it owns and a slot back
//! to its epoch. Every filter in the crate goes through these functions.

use std::fmt;

/// A slot number
pub type Slot = u64;

/// An epoch index
pub type Epoch = u64;

/// Number of slots in one epoch
pub const EPOCH_LEN: u64 = 432_000;

/// Largest epoch whose slot range still fits in a `u64`
pub const MAX_EPOCH: Epoch = u64::MAX / EPOCH_LEN - 1;

/// Inclusive slot range owned by one epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochRange {
    /// First slot of the epoch
    pub start: Slot,
    /// Last slot of the epoch (inclusive)
    pub stop: Slot,
}

impl EpochRange {
    /// Range owned by `epoch`
    pub fn of(epoch: Epoch) -> Self {
        let (start, stop) = epoch_range(epoch);
        Self { start, stop }
    }

    /// Whether `slot` falls inside this range
    pub fn contains(&self, slot: Slot) -> bool {
        self.start <= slot && slot <= self.stop
    }
}

impl fmt::Display for EpochRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.stop)
    }
}

/// First and last (inclusive) slot of `epoch`
///
/// Overflows for epochs above [`MAX_EPOCH`]; callers validate first.
pub fn epoch_range(epoch: Epoch) -> (Slot, Slot) {
    let start = epoch * EPOCH_LEN;
    let stop = start + EPOCH_LEN - 1;
    (start, stop)
}

/// Epoch that owns `slot`
pub fn epoch_of(slot: Slot) -> Epoch {
    slot / EPOCH_LEN
}

/// Slot bounds to request from the remote node for `epoch`
///
/// Starts one slot before the epoch so the last slot of the previous epoch
/// is captured too. Clamped at zero for epoch 0.
pub fn fetch_bounds(epoch: Epoch) -> (Slot, Slot) {
    let (start, stop) = epoch_range(epoch);
    (start.saturating_sub(1), stop)
}
