//! Reconciliation of two canonical slot lists for one epoch

use crate::epoch::{Epoch, Slot};
use crate::slot_list::{contains, retain_epoch};
use std::fmt::Write;

/// Labels used when rendering the two sides of a report
#[derive(Debug, Clone, Copy)]
pub struct SideLabels<'a> {
    pub a: &'a str,
    pub b: &'a str,
}

impl Default for SideLabels<'static> {
    fn default() -> Self {
        Self {
            a: "faithful",
            b: "solana",
        }
    }
}

/// Result of comparing list A with list B
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Slots present in A but missing from B, ascending
    pub only_in_a: Vec<Slot>,
    /// Slots present in B but missing from A, ascending
    pub only_in_b: Vec<Slot>,
}

impl Report {
    pub fn is_identical(&self) -> bool {
        self.only_in_a.is_empty() && self.only_in_b.is_empty()
    }

    /// Human-readable report, one slot per line under each non-empty side
    pub fn render(&self, labels: SideLabels<'_>) -> String {
        let mut out = String::new();
        if !self.only_in_a.is_empty() {
            let _ = writeln!(out, "🚫 blocks in {} but not in {}:", labels.a, labels.b);
            for slot in &self.only_in_a {
                let _ = writeln!(out, "{}", slot);
            }
        }
        if !self.only_in_b.is_empty() {
            let _ = writeln!(out, "🚫 blocks in {} but not in {}:", labels.b, labels.a);
            for slot in &self.only_in_b {
                let _ = writeln!(out, "{}", slot);
            }
        }
        if self.is_identical() {
            out.push_str("✅ No differences.\n");
        }
        out
    }
}

/// Slots of `from` that `other` does not contain
fn missing_from(from: &[Slot], other: &[Slot]) -> Vec<Slot> {
    from.iter()
        .copied()
        .filter(|slot| !contains(other, *slot))
        .collect()
}

/// Compare two canonical lists within `epoch`
///
/// Slots outside the epoch are dropped from both sides first. Never fails.
pub fn reconcile(a: Vec<Slot>, b: Vec<Slot>, epoch: Epoch) -> Report {
    let a = retain_epoch(a, epoch);
    let b = retain_epoch(b, epoch);

    Report {
        only_in_a: missing_from(&a, &b),
        only_in_b: missing_from(&b, &a),
    }
}
