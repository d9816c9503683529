#![forbid(unsafe_code)]
//! Crash/recovery simulation core.
//!
//! Initializes a disk of randomly occupied blocks, injects corruption over
//! the used ones, resolves each corrupted block with an independent survival
//! draw, reorders the layout per a placement strategy, and fabricates
//! latency/fragmentation metrics from the result. Everything returns plain
//! data; rendering lives in `csim-view`.

pub mod config;
pub mod crash;
pub mod disk;
pub mod metrics;
pub mod recovery;
pub mod report;
pub mod rng;
pub mod session;

pub use config::SimConfig;
pub use crash::{CrashOutcome, corruption_target, inject_corruption};
pub use csim_types::{BlockState, Result, SimError, Strategy};
pub use disk::Disk;
pub use metrics::{DiskMetrics, StateCounts, count_fragments, count_states, estimate};
pub use recovery::{RecoveryOutcome, apply_strategy, resolve_corrupted};
pub use report::RecoveryReport;
pub use rng::{EntropySource, Lcg64, ScriptedEntropy};
pub use session::{LogEntry, SimSession};
