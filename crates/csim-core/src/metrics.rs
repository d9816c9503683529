//! Synthetic latency and fragmentation estimator.
//!
//! Pure function of the current block layout: no side effects, no
//! randomness. The latency constants are pedagogical knobs for the bar
//! chart, not a storage model, and must stay exactly as written.

use csim_types::BlockState;
use serde::{Deserialize, Serialize};

/// Fabricated readouts for the three chart bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiskMetrics {
    /// Simulated read latency in milliseconds, 2 decimal places.
    pub read_ms: f64,
    /// Simulated write latency in milliseconds, 2 decimal places.
    pub write_ms: f64,
    /// Share of occupied blocks that begin a new contiguous run.
    pub fragmentation_percent: u32,
}

/// Per-state tallies over one layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    pub free: usize,
    pub used: usize,
    pub corrupted: usize,
    pub recovered: usize,
}

impl StateCounts {
    /// Blocks occupying space: everything except `Free`.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.used + self.corrupted + self.recovered
    }
}

/// Tally every block state in one scan.
#[must_use]
pub fn count_states(states: &[BlockState]) -> StateCounts {
    let mut counts = StateCounts::default();
    for state in states {
        match state {
            BlockState::Free => counts.free += 1,
            BlockState::Used => counts.used += 1,
            BlockState::Corrupted => counts.corrupted += 1,
            BlockState::Recovered => counts.recovered += 1,
        }
    }
    counts
}

/// Number of maximal contiguous occupied runs, scanning left to right.
///
/// A run starts at every occupied block whose predecessor is not occupied;
/// an isolated block therefore counts exactly like the start of a longer
/// run.
#[must_use]
pub fn count_fragments(states: &[BlockState]) -> usize {
    let mut fragments = 0;
    let mut previous_occupied = false;
    for state in states {
        let occupied = state.is_occupied();
        if occupied && !previous_occupied {
            fragments += 1;
        }
        previous_occupied = occupied;
    }
    fragments
}

/// Estimate metrics over the current layout.
#[must_use]
pub fn estimate(states: &[BlockState]) -> DiskMetrics {
    let counts = count_states(states);
    let occupied = counts.occupied();
    let fragmentation_percent = if occupied == 0 {
        0
    } else {
        percentage(count_fragments(states), occupied)
    };

    #[allow(clippy::cast_precision_loss)]
    let corrupted = counts.corrupted as f64;
    let fragmentation = f64::from(fragmentation_percent);

    DiskMetrics {
        read_ms: round2(4.0 + fragmentation * 0.05 + corrupted * 0.1),
        write_ms: round2(5.0 + fragmentation * 0.04 + corrupted * 0.12),
        fragmentation_percent,
    }
}

/// Rounded integer percentage `part / whole × 100`. `whole` must be
/// non-zero; `part ≤ whole` keeps the result in `0..=100`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // ratio ≤ 1 keeps the percentage within u32
fn percentage(part: usize, whole: usize) -> u32 {
    #[allow(clippy::cast_precision_loss)]
    let ratio = part as f64 / whole as f64;
    (ratio * 100.0).round() as u32
}

/// Round to 2 decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
