#![forbid(unsafe_code)]
//! CrashSim public API facade.
//!
//! Re-exports the simulation core through a stable external interface.
//! Downstream consumers (CLI, presentation adapters) depend on this crate.

pub use csim_core::*;
