//! Recovery report snapshot.

use crate::metrics::DiskMetrics;
use csim_types::Strategy;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Snapshot of the most recent recovery run.
///
/// At most one is retained per session; every recovery run overwrites the
/// previous snapshot. There is no history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryReport {
    /// Milliseconds since the Unix epoch at snapshot time.
    pub unix_millis: u64,
    /// Placement strategy that was applied.
    pub strategy: Strategy,
    pub recovered_blocks: usize,
    pub lost_blocks: usize,
    pub metrics: DiskMetrics,
}

impl RecoveryReport {
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Milliseconds since the Unix epoch; zero if the clock reads earlier.
#[must_use]
pub fn unix_millis_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0_u64, |duration| {
            u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
        })
}
