#![forbid(unsafe_code)]
//! Text presentation adapter.
//!
//! Renders simulation data (block layouts, metrics, reports, the event log)
//! to plain strings. Everything here is a pure function over core data; the
//! core never calls back into this crate, and the external charting
//! collaborator consumes the same three numbers the bar chart shows.

use csim_core::{DiskMetrics, LogEntry, RecoveryReport};
use csim_types::BlockState;

/// Glyphs per line when rendering a block layout.
const BLOCKS_PER_ROW: usize = 32;
/// Character width of a full metric bar.
const BAR_WIDTH: usize = 40;
/// Latency value that fills a bar completely.
const LATENCY_BAR_MAX: f64 = 20.0;

/// Visual tag for one block, the equivalent of a style class name.
#[must_use]
pub fn state_tag(state: BlockState) -> &'static str {
    match state {
        BlockState::Free => "free",
        BlockState::Used => "used",
        BlockState::Corrupted => "corrupted",
        BlockState::Recovered => "recovered",
    }
}

/// One-character glyph for one block.
#[must_use]
pub fn state_glyph(state: BlockState) -> char {
    match state {
        BlockState::Free => '.',
        BlockState::Used => '#',
        BlockState::Corrupted => 'x',
        BlockState::Recovered => '+',
    }
}

/// Render a block layout as rows of glyphs, 32 blocks per row.
#[must_use]
pub fn render_blocks(states: &[BlockState]) -> Vec<String> {
    states
        .chunks(BLOCKS_PER_ROW)
        .map(|row| row.iter().map(|state| state_glyph(*state)).collect())
        .collect()
}

/// Render the three numeric readouts with proportional ASCII bars.
#[must_use]
pub fn render_metric_bars(metrics: &DiskMetrics) -> Vec<String> {
    vec![
        format!(
            "read  {:>7.2} ms  |{}|",
            metrics.read_ms,
            bar(metrics.read_ms, LATENCY_BAR_MAX)
        ),
        format!(
            "write {:>7.2} ms  |{}|",
            metrics.write_ms,
            bar(metrics.write_ms, LATENCY_BAR_MAX)
        ),
        format!(
            "frag  {:>6} %   |{}|",
            metrics.fragmentation_percent,
            bar(f64::from(metrics.fragmentation_percent), 100.0)
        ),
    ]
}

/// Render a recovery report as summary lines.
#[must_use]
pub fn render_report(report: &RecoveryReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "recovery report: strategy={} recovered={} lost={}",
            report.strategy, report.recovered_blocks, report.lost_blocks
        ),
        format!("snapshot at unix_millis={}", report.unix_millis),
    ];
    lines.extend(render_metric_bars(&report.metrics));
    lines
}

/// Render event log entries with their timestamps.
#[must_use]
pub fn render_log(entries: &[LogEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| format!("[{}] {}", entry.unix_millis, entry.message))
        .collect()
}

/// The caller-facing absence signal when no recovery has run yet.
#[must_use]
pub fn no_report_line() -> String {
    "no report yet: run a recovery first".to_owned()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // share is clamped to [0, 1]
fn bar(value: f64, max: f64) -> String {
    let share = (value / max).clamp(0.0, 1.0);
    #[allow(clippy::cast_precision_loss)]
    let filled = (share * BAR_WIDTH as f64).round() as usize;
    let mut rendered = "#".repeat(filled);
    rendered.push_str(&" ".repeat(BAR_WIDTH - filled));
    rendered
}
