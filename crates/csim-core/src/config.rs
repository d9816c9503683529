//! Simulation configuration with lenient input coercion.
//!
//! Raw inputs arrive as free-form strings from the UI surface. Absent or
//! invalid values fall back to the documented defaults instead of
//! signaling an error.

use csim_types::{DEFAULT_CORRUPTION_PERCENT, DEFAULT_DISK_SIZE, Strategy};
use serde::{Deserialize, Serialize};

/// Inputs read at invocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of blocks a disk initialization creates.
    pub disk_size: u32,
    /// Fraction of the disk a crash aims to corrupt, in percent (0–100).
    pub corruption_percent: u32,
    /// Placement strategy applied after recovery.
    pub strategy: Strategy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            disk_size: DEFAULT_DISK_SIZE,
            corruption_percent: DEFAULT_CORRUPTION_PERCENT,
            strategy: Strategy::Keep,
        }
    }
}

impl SimConfig {
    /// Build a config from raw UI-style inputs, coercing anything absent or
    /// invalid to its default.
    #[must_use]
    pub fn from_inputs(
        disk_size: Option<&str>,
        corruption_percent: Option<&str>,
        strategy: Option<&str>,
    ) -> Self {
        Self {
            disk_size: parse_disk_size(disk_size),
            corruption_percent: parse_percent(corruption_percent),
            strategy: strategy.map_or(Strategy::Keep, Strategy::parse_lenient),
        }
    }
}

fn parse_disk_size(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|size| *size > 0)
        .unwrap_or(DEFAULT_DISK_SIZE)
}

fn parse_percent(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|percent| *percent <= 100)
        .unwrap_or(DEFAULT_CORRUPTION_PERCENT)
}
