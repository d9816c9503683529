//! Recovery: per-block survival coin flips plus a cosmetic placement pass.

use crate::disk::Disk;
use crate::rng::EntropySource;
use csim_types::{BlockState, Strategy};
use serde::{Deserialize, Serialize};

/// Counts from one recovery pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryOutcome {
    /// Corrupted blocks that survived as `Recovered`.
    pub recovered_blocks: usize,
    /// Corrupted blocks that were lost and freed.
    pub lost_blocks: usize,
}

/// Resolve every corrupted block with an independent draw: the block
/// survives as `Recovered` when the draw lands below `probability`,
/// otherwise it is lost and freed. Non-corrupted blocks are untouched.
pub fn resolve_corrupted(
    disk: &mut Disk,
    probability: f64,
    entropy: &mut dyn EntropySource,
) -> RecoveryOutcome {
    let mut outcome = RecoveryOutcome::default();
    for state in disk.states_mut() {
        if *state != BlockState::Corrupted {
            continue;
        }
        if entropy.next_unit() < probability {
            *state = BlockState::Recovered;
            outcome.recovered_blocks += 1;
        } else {
            *state = BlockState::Free;
            outcome.lost_blocks += 1;
        }
    }
    outcome
}

/// Reorder the whole sequence for display.
///
/// `Best` must be a stable sort: equal tiers keep their relative order, so
/// repeated runs over the same layout do not shuffle visually identical
/// blocks. `slice::sort_by_key` guarantees that.
pub fn apply_strategy(disk: &mut Disk, strategy: Strategy) {
    match strategy {
        Strategy::Best => disk.states_mut().sort_by_key(|state| state.tier()),
        Strategy::Next => disk.states_mut().reverse(),
        Strategy::Keep => {}
    }
}
