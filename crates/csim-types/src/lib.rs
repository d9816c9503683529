#![forbid(unsafe_code)]
//! Shared vocabulary for the CrashSim simulator.
//!
//! Everything here is plain data: the block lifecycle enum, the placement
//! strategy selector, the simulation defaults, and the one library error.
//! The simulation core (`csim-core`) and the presentation adapter
//! (`csim-view`) both depend on this crate and never on each other.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Disk size used when none (or an invalid one) is supplied.
pub const DEFAULT_DISK_SIZE: u32 = 64;
/// Corruption percentage used when none (or an invalid one) is supplied.
pub const DEFAULT_CORRUPTION_PERCENT: u32 = 20;
/// Probability that a corrupted block survives recovery.
pub const RECOVERY_PROBABILITY: f64 = 0.7;
/// Probability that a freshly initialized block starts out used.
pub const INIT_USED_PROBABILITY: f64 = 0.5;

/// Lifecycle state of one simulated disk block.
///
/// Transitions: `Used → Corrupted` (crash), `Corrupted → Recovered | Free`
/// (recovery). Reinitialization resets every block to `Used` or `Free`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockState {
    Free,
    Used,
    Corrupted,
    Recovered,
}

impl BlockState {
    /// Whether this block occupies space (anything but `Free`).
    #[must_use]
    pub fn is_occupied(self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Sort tier used by [`Strategy::Best`]: free first, recovered next,
    /// everything else last.
    #[must_use]
    pub fn tier(self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Recovered => 1,
            Self::Used | Self::Corrupted => 2,
        }
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Free => "free",
            Self::Used => "used",
            Self::Corrupted => "corrupted",
            Self::Recovered => "recovered",
        };
        f.write_str(name)
    }
}

/// Cosmetic placement strategy applied to the whole disk after recovery.
///
/// Strategies only reorder the display sequence; they never change which
/// blocks survived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Stable sort by [`BlockState::tier`].
    Best,
    /// Exact reversal of the sequence.
    Next,
    /// Leave the order unchanged.
    #[default]
    Keep,
}

impl Strategy {
    /// Parse a raw selector string. Anything other than `best` or `next`
    /// means "leave the order unchanged" rather than an error.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        match input.trim() {
            "best" => Self::Best,
            "next" => Self::Next,
            _ => Self::Keep,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Best => "best",
            Self::Next => "next",
            Self::Keep => "keep",
        };
        f.write_str(name)
    }
}

/// The one recognized simulation failure.
///
/// Invalid configuration inputs coerce to defaults instead of erroring, and
/// a missing report is `None` rather than a failure, so recovery against an
/// uninitialized disk is the only operation that can refuse to run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Recovery was requested before any disk was initialized.
    #[error("no disk to recover: initialize a disk first")]
    EmptyDisk,
}

/// Result alias using `SimError`.
pub type Result<T> = std::result::Result<T, SimError>;
