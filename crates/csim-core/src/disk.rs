//! The simulated disk: an ordered sequence of block states.

use crate::rng::EntropySource;
use csim_types::{BlockState, INIT_USED_PROBABILITY};

/// Ordered block sequence.
///
/// Invariant: the length is fixed between initializations. Recovery
/// strategies may permute the order, so indices are not stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disk {
    blocks: Vec<BlockState>,
}

impl Disk {
    /// Empty disk. Recovery refuses to run until [`Disk::initialize`]
    /// replaces it with real blocks.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the contents with `size` fresh blocks, each independently
    /// `Used` with probability 0.5, else `Free`.
    pub fn initialize(&mut self, size: u32, entropy: &mut dyn EntropySource) {
        self.blocks.clear();
        self.blocks.reserve(size as usize);
        for _ in 0..size {
            let state = if entropy.next_unit() < INIT_USED_PROBABILITY {
                BlockState::Used
            } else {
                BlockState::Free
            };
            self.blocks.push(state);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Current block states in display order.
    #[must_use]
    pub fn states(&self) -> &[BlockState] {
        &self.blocks
    }

    pub(crate) fn states_mut(&mut self) -> &mut [BlockState] {
        &mut self.blocks
    }

    /// Number of blocks currently in `state`.
    #[must_use]
    pub fn count(&self, state: BlockState) -> usize {
        self.blocks.iter().filter(|block| **block == state).count()
    }
}
