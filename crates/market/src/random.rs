// In crates/market/src/random.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// The randomness port consumed by the price simulator.
///
/// Implementors only provide uniform draws; the normal and ranged draws are
/// derived from them so that a scripted source fully determines a step.
pub trait RandomSource {
    /// A uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// A uniform draw in `[low, high)`.
    fn uniform_between(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_uniform()
    }

    /// A standard normal draw using the Box–Muller transform.
    ///
    /// `1 - u` keeps the logarithm argument in `(0, 1]`, so the result is
    /// always finite.
    fn standard_normal(&mut self) -> f64 {
        let u1 = 1.0 - self.next_uniform();
        let u2 = self.next_uniform();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }
}

/// Production randomness backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Reproducible sequence for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-reproducible sequence seeded by the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of uniform draws, wrapping around at the end.
///
/// An empty script always yields `0.0`.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
