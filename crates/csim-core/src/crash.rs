//! Crash injection: flip a fraction of used blocks to corrupted.

use crate::disk::Disk;
use crate::rng::EntropySource;
use csim_types::BlockState;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome of one crash simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashOutcome {
    /// Blocks flipped to `Corrupted` by this crash.
    pub corrupted_blocks: usize,
}

/// Number of blocks a crash aims to corrupt: `round(percent/100 × size)`,
/// never less than one.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // percent ≤ 100 keeps the target within the disk size
pub fn corruption_target(percent: u32, disk_size: usize) -> usize {
    #[allow(clippy::cast_precision_loss)]
    let scaled = (f64::from(percent) / 100.0) * disk_size as f64;
    (scaled.round() as usize).max(1)
}

/// Corrupt up to `corruption_target` distinct used blocks, selected
/// uniformly without replacement. If fewer used blocks exist than the
/// target, all of them are corrupted.
pub fn inject_corruption(
    disk: &mut Disk,
    percent: u32,
    entropy: &mut dyn EntropySource,
) -> CrashOutcome {
    let target = corruption_target(percent, disk.len());
    let mut used: Vec<usize> = disk
        .states()
        .iter()
        .enumerate()
        .filter(|(_, state)| **state == BlockState::Used)
        .map(|(index, _)| index)
        .collect();
    let corrupt_count = target.min(used.len());

    // Partial Fisher–Yates: after `slot` swaps the prefix holds a uniform
    // without-replacement sample of the used indices.
    for slot in 0..corrupt_count {
        let remaining = used.len() - slot;
        let pick = slot + unit_index(entropy.next_unit(), remaining);
        used.swap(slot, pick);
        disk.states_mut()[used[slot]] = BlockState::Corrupted;
    }

    info!(
        target: "csim::crash",
        blocks_corrupted = corrupt_count,
        percent,
        disk_size = disk.len(),
        "corruption injected"
    );

    CrashOutcome {
        corrupted_blocks: corrupt_count,
    }
}

/// Map a unit draw onto `0..bound`. `bound` must be non-zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // unit < 1.0, so the product floors below bound
fn unit_index(unit: f64, bound: usize) -> usize {
    #[allow(clippy::cast_precision_loss)]
    let scaled = unit * bound as f64;
    (scaled as usize).min(bound - 1)
}
