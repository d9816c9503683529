//! The simulation session: one owner for all mutable state.
//!
//! A `SimSession` plays the role the page lifetime plays in a browser demo:
//! it owns the disk, the last recovery report, the append-only event log,
//! and the entropy source, and every operation mutates it explicitly rather
//! than reaching for globals. State lives exactly as long as the session
//! value; nothing persists.

use crate::config::SimConfig;
use crate::crash::{self, CrashOutcome};
use crate::disk::Disk;
use crate::metrics;
use crate::recovery;
use crate::report::{self, RecoveryReport};
use crate::rng::{EntropySource, Lcg64};
use csim_types::{
    DEFAULT_CORRUPTION_PERCENT, DEFAULT_DISK_SIZE, RECOVERY_PROBABILITY, Result, SimError,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One timestamped line of the session's append-only event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Milliseconds since the Unix epoch when the line was appended.
    pub unix_millis: u64,
    pub message: String,
}

/// Owner of all mutable simulation state.
///
/// Operations run synchronously to completion on one thread; there is no
/// shared access and no locking.
pub struct SimSession {
    config: SimConfig,
    disk: Disk,
    last_report: Option<RecoveryReport>,
    event_log: Vec<LogEntry>,
    entropy: Box<dyn EntropySource>,
}

impl SimSession {
    /// Session with clock-seeded entropy, for interactive use.
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        Self::with_entropy(config, Box::new(Lcg64::from_clock()))
    }

    /// Session with caller-supplied entropy, for reproducible runs.
    #[must_use]
    pub fn with_entropy(config: SimConfig, entropy: Box<dyn EntropySource>) -> Self {
        Self {
            config,
            disk: Disk::empty(),
            last_report: None,
            event_log: Vec::new(),
            entropy,
        }
    }

    #[must_use]
    pub fn config(&self) -> SimConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SimConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn disk(&self) -> &Disk {
        &self.disk
    }

    #[must_use]
    pub fn event_log(&self) -> &[LogEntry] {
        &self.event_log
    }

    /// Most recent recovery report, or `None` if no recovery has run yet.
    #[must_use]
    pub fn last_report(&self) -> Option<&RecoveryReport> {
        self.last_report.as_ref()
    }

    /// Replace the disk with freshly drawn blocks. A zero configured size
    /// coerces to the default rather than erroring.
    pub fn initialize_disk(&mut self) {
        let size = if self.config.disk_size == 0 {
            DEFAULT_DISK_SIZE
        } else {
            self.config.disk_size
        };
        self.disk.initialize(size, self.entropy.as_mut());
        info!(target: "csim::session", disk_size = size, "disk initialized");
        self.log(format!("initialized disk with {size} blocks"));
    }

    /// Reinitialize the disk, then corrupt a slice of its used blocks.
    pub fn simulate_crash(&mut self) -> CrashOutcome {
        self.initialize_disk();
        let outcome = crash::inject_corruption(
            &mut self.disk,
            self.config.corruption_percent,
            self.entropy.as_mut(),
        );
        self.log(format!(
            "crash simulated: {} blocks corrupted",
            outcome.corrupted_blocks
        ));
        outcome
    }

    /// Resolve corrupted blocks, apply the placement strategy, and snapshot
    /// a report.
    ///
    /// On an uninitialized disk this logs the failure and returns
    /// [`SimError::EmptyDisk`] without touching any state.
    pub fn run_recovery(&mut self) -> Result<RecoveryReport> {
        if self.disk.is_empty() {
            warn!(target: "csim::session", "recovery requested with no disk");
            self.log("recovery skipped: no disk initialized".to_owned());
            return Err(SimError::EmptyDisk);
        }

        let outcome = recovery::resolve_corrupted(
            &mut self.disk,
            RECOVERY_PROBABILITY,
            self.entropy.as_mut(),
        );
        recovery::apply_strategy(&mut self.disk, self.config.strategy);

        let report = RecoveryReport {
            unix_millis: report::unix_millis_now(),
            strategy: self.config.strategy,
            recovered_blocks: outcome.recovered_blocks,
            lost_blocks: outcome.lost_blocks,
            metrics: metrics::estimate(self.disk.states()),
        };
        info!(
            target: "csim::session",
            strategy = %report.strategy,
            recovered = report.recovered_blocks,
            lost = report.lost_blocks,
            fragmentation = report.metrics.fragmentation_percent,
            "recovery finished"
        );
        self.log(format!(
            "recovery finished ({}): {} recovered, {} lost",
            report.strategy, report.recovered_blocks, report.lost_blocks
        ));
        self.last_report = Some(report.clone());
        Ok(report)
    }

    /// Fixed end-to-end run: default disk size, default corruption percent,
    /// the session's configured strategy. Initialization, crash, and
    /// recovery run back to back with no further parameters.
    pub fn quick_simulation(&mut self) -> Result<RecoveryReport> {
        let saved = self.config;
        self.config.disk_size = DEFAULT_DISK_SIZE;
        self.config.corruption_percent = DEFAULT_CORRUPTION_PERCENT;

        self.log("quick simulation started".to_owned());
        self.initialize_disk();
        self.simulate_crash();
        let result = self.run_recovery();

        self.config = saved;
        result
    }

    fn log(&mut self, message: String) {
        self.event_log.push(LogEntry {
            unix_millis: report::unix_millis_now(),
            message,
        });
    }
}
