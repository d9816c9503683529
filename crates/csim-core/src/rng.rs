//! Injectable randomness.
//!
//! Every stochastic decision in the simulator (initial block occupancy,
//! corruption targets, recovery coin flips) draws from an [`EntropySource`],
//! so tests can pin a seed or script the exact sequence of draws and assert
//! transition outcomes instead of sampling distributions.

/// Uniform random source over `[0, 1)`.
pub trait EntropySource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Knuth MMIX linear congruential generator.
///
/// Small, dependency-free, and good enough for a display simulation; the
/// point is seedability, not statistical quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg64 {
    state: u64,
}

impl Lcg64 {
    /// Seeded generator for reproducible runs.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            state: seed ^ 0xB10C_5EED_DA7A_0001,
        }
    }

    /// Clock/pid-seeded generator for non-reproducible interactive runs.
    #[must_use]
    pub fn from_clock() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0_u128, |duration| duration.as_nanos());
        let low = u64::try_from(nanos & u128::from(u64::MAX)).unwrap_or(0);
        Self::from_seed(low ^ u64::from(std::process::id()))
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }
}

impl EntropySource for Lcg64 {
    #[allow(clippy::cast_precision_loss)] // 53 explicit mantissa bits survive the shift
    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// Test-only in spirit, but exported so integration suites can force exact
/// per-block outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedEntropy {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedEntropy {
    /// Script the next draws. An empty script behaves as a constant zero.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl EntropySource for ScriptedEntropy {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_is_deterministic_per_seed() {
        let mut a = Lcg64::from_seed(42);
        let mut b = Lcg64::from_seed(42);
        for _ in 0..64 {
            let draw = a.next_unit();
            assert_eq!(draw, b.next_unit());
            assert!((0.0..1.0).contains(&draw));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Lcg64::from_seed(1);
        let mut b = Lcg64::from_seed(2);
        let diverged = (0..8).any(|_| a.next_unit() != b.next_unit());
        assert!(diverged);
    }

    #[test]
    fn scripted_entropy_cycles() {
        let mut scripted = ScriptedEntropy::new(vec![0.1, 0.9]);
        assert_eq!(scripted.next_unit(), 0.1);
        assert_eq!(scripted.next_unit(), 0.9);
        assert_eq!(scripted.next_unit(), 0.1);
    }

    #[test]
    fn empty_script_is_constant_zero() {
        let mut scripted = ScriptedEntropy::new(Vec::new());
        assert_eq!(scripted.next_unit(), 0.0);
        assert_eq!(scripted.next_unit(), 0.0);
    }
}
