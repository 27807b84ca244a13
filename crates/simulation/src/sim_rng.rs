//! Deterministic jitter sources for the daily simulation.
//!
//! Every multi-day run pulls its daily throughput perturbation from a
//! [`JitterSource`] so that runs can be replayed exactly: `SimRng` wraps a
//! seeded `ChaCha8Rng` for cross-platform determinism, `ReplayJitter` plays
//! back a recorded sequence, and `FixedJitter` yields a constant.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::ConversionError;

/// Default seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;

// ---------------------------------------------------------------------------
// JitterSource
// ---------------------------------------------------------------------------

/// Yields the multiplicative perturbation applied to each day's input mass.
pub trait JitterSource {
    fn next_jitter(&mut self) -> f64;
}

impl<T: JitterSource + ?Sized> JitterSource for &mut T {
    fn next_jitter(&mut self) -> f64 {
        (**self).next_jitter()
    }
}

// ---------------------------------------------------------------------------
// JitterRange
// ---------------------------------------------------------------------------

/// Half-open range `[low, high)` that random jitter is drawn from.
/// `low == high` is a valid constant range: every draw is `low` and the RNG is
/// left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterRange {
    pub low: f64,
    pub high: f64,
}

impl Default for JitterRange {
    /// +-10% around the nominal daily mass.
    fn default() -> Self {
        Self {
            low: 0.9,
            high: 1.1,
        }
    }
}

impl JitterRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        if self.low >= self.high {
            return value == self.low;
        }
        value >= self.low && value < self.high
    }

    pub fn validate(&self) -> Result<(), ConversionError> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(ConversionError::invalid(format!(
                "jitter range must be finite, got [{}, {})",
                self.low, self.high
            )));
        }
        if self.low <= 0.0 {
            return Err(ConversionError::invalid(format!(
                "jitter range must be positive, got low = {}",
                self.low
            )));
        }
        if self.low > self.high {
            return Err(ConversionError::invalid(format!(
                "jitter range is inverted: [{}, {})",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

fn draw(rng: &mut ChaCha8Rng, range: JitterRange) -> f64 {
    if range.low >= range.high {
        return range.low;
    }
    rng.gen_range(range.low..range.high)
}

// ---------------------------------------------------------------------------
// SimRng resource
// ---------------------------------------------------------------------------

/// Deterministic RNG resource for all simulation randomness.
///
/// Used directly as a [`JitterSource`] it draws from the default +-10% range;
/// [`SimRng::jitter`] borrows it with a configured range instead.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl SimRng {
    /// Create a new `SimRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Borrow this RNG as a jitter source drawing from `range`.
    pub fn jitter(&mut self, range: JitterRange) -> RangedJitter<'_> {
        RangedJitter { rng: self, range }
    }
}

impl JitterSource for SimRng {
    fn next_jitter(&mut self) -> f64 {
        draw(&mut self.0, JitterRange::default())
    }
}

/// A [`SimRng`] paired with the range it should draw from.
pub struct RangedJitter<'a> {
    rng: &'a mut SimRng,
    range: JitterRange,
}

impl JitterSource for RangedJitter<'_> {
    fn next_jitter(&mut self) -> f64 {
        draw(&mut self.rng.0, self.range)
    }
}

// ---------------------------------------------------------------------------
// Replay + fixed sources
// ---------------------------------------------------------------------------

/// Replays a recorded jitter sequence, wrapping around when exhausted.
/// An empty sequence yields the neutral jitter 1.0.
#[derive(Debug, Clone, Default)]
pub struct ReplayJitter {
    values: Vec<f64>,
    cursor: usize,
}

impl ReplayJitter {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl JitterSource for ReplayJitter {
    fn next_jitter(&mut self) -> f64 {
        if self.values.is_empty() {
            return 1.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Always yields the same jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn next_jitter(&mut self) -> f64 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Seeds `SimRng` from `SimulationConfig::seed` unless an RNG was inserted first.
pub struct SimRngPlugin;

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>();
        if !app.world().contains_resource::<SimRng>() {
            let seed = app.world().resource::<SimulationConfig>().seed;
            app.insert_resource(SimRng::from_seed_u64(seed));
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_deterministic() {
        let mut a = SimRng::default();
        let mut b = SimRng::default();
        let vals_a: Vec<f64> = (0..10).map(|_| a.next_jitter()).collect();
        let vals_b: Vec<f64> = (0..10).map(|_| b.next_jitter()).collect();
        assert_eq!(vals_a, vals_b);
    }

    #[test]
    fn test_from_seed_u64_deterministic() {
        let mut a = SimRng::from_seed_u64(12345);
        let mut b = SimRng::from_seed_u64(12345);
        let range = JitterRange::new(0.5, 1.5);
        let vals_a: Vec<f64> = (0..20).map(|_| a.jitter(range).next_jitter()).collect();
        let vals_b: Vec<f64> = (0..20).map(|_| b.jitter(range).next_jitter()).collect();
        assert_eq!(vals_a, vals_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = SimRng::from_seed_u64(1);
        let mut b = SimRng::from_seed_u64(2);
        let vals_a: Vec<f64> = (0..10).map(|_| a.next_jitter()).collect();
        let vals_b: Vec<f64> = (0..10).map(|_| b.next_jitter()).collect();
        assert_ne!(vals_a, vals_b);
    }

    #[test]
    fn test_default_jitter_stays_within_ten_percent() {
        let mut rng = SimRng::from_seed_u64(7);
        let range = JitterRange::default();
        for _ in 0..1000 {
            let j = rng.next_jitter();
            assert!(range.contains(j), "jitter {j} outside [0.9, 1.1)");
        }
    }

    #[test]
    fn test_ranged_and_default_draws_agree() {
        let mut a = SimRng::from_seed_u64(99);
        let mut b = SimRng::from_seed_u64(99);
        let mut ranged = b.jitter(JitterRange::default());
        for _ in 0..10 {
            assert_eq!(a.next_jitter(), ranged.next_jitter());
        }
    }

    #[test]
    fn test_degenerate_range_is_constant() {
        let mut rng = SimRng::default();
        let mut src = rng.jitter(JitterRange::new(1.0, 1.0));
        for _ in 0..5 {
            assert_eq!(src.next_jitter(), 1.0);
        }
    }

    #[test]
    fn test_constant_range_leaves_rng_untouched() {
        let mut rng = SimRng::from_seed_u64(9);
        let constant = JitterRange::new(1.0, 1.0);
        assert!(constant.validate().is_ok());
        assert!(constant.contains(1.0));
        assert!(!constant.contains(1.01));
        assert_eq!(rng.jitter(constant).next_jitter(), 1.0);

        let mut fresh = SimRng::from_seed_u64(9);
        assert_eq!(rng.next_jitter(), fresh.next_jitter());
    }

    #[test]
    fn test_replay_cycles() {
        let mut replay = ReplayJitter::new(vec![0.9, 1.0, 1.1]);
        let vals: Vec<f64> = (0..5).map(|_| replay.next_jitter()).collect();
        assert_eq!(vals, vec![0.9, 1.0, 1.1, 0.9, 1.0]);
    }

    #[test]
    fn test_empty_replay_is_neutral() {
        let mut replay = ReplayJitter::default();
        assert_eq!(replay.next_jitter(), 1.0);
    }

    #[test]
    fn test_fixed_jitter() {
        let mut fixed = FixedJitter(1.05);
        assert_eq!(fixed.next_jitter(), 1.05);
        assert_eq!(fixed.next_jitter(), 1.05);
    }

    #[test]
    fn test_range_validation() {
        assert!(JitterRange::default().validate().is_ok());
        assert!(JitterRange::new(1.0, 1.0).validate().is_ok());
        assert!(JitterRange::new(1.1, 0.9).validate().is_err());
        assert!(JitterRange::new(0.0, 1.1).validate().is_err());
        assert!(JitterRange::new(0.9, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_plugin_seeds_from_config() {
        let mut app = App::new();
        app.insert_resource(SimulationConfig {
            seed: 777,
            ..Default::default()
        });
        app.add_plugins(SimRngPlugin);

        let mut expected = SimRng::from_seed_u64(777);
        let mut rng = app.world_mut().resource_mut::<SimRng>();
        assert_eq!(rng.next_jitter(), expected.next_jitter());
    }
}
