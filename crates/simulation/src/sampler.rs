//! Random draws for process generation and critical-section decisions.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use schedsim_core::Sampler;
use std::collections::VecDeque;

/// [`Sampler`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSampler<R> {
    rng: R,
}

/// Deterministic sampler used for simulation runs.
pub type SeededSampler = RngSampler<ChaCha8Rng>;

impl RngSampler<ChaCha8Rng> {
    /// Create a sampler whose draws are fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RngSampler<R> {
    /// Wrap a generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Sampler for RngSampler<R> {
    fn exponential(&mut self, lambda: f64) -> f64 {
        // Inverse CDF; 1 - u is in (0, 1] so the log is finite.
        let u: f64 = self.rng.gen();
        -(1.0 - u).ln() / lambda
    }

    fn uniform(&mut self, low: u64, high: u64) -> u64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Sampler with scripted outcomes, for exercising exact scheduling paths.
///
/// Entry draws come from a queue and fall back to a fixed value once it is
/// exhausted. Uniform draws return a fixed value clamped into the requested
/// range; exponential draws return a fixed value.
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    entry_draws: VecDeque<u8>,
    default_entry: u8,
    uniform_value: u64,
    exponential_value: f64,
    entry_draws_taken: usize,
}

impl ScriptedSampler {
    /// Every entry draw returns `entry`.
    pub fn always(entry: u8) -> Self {
        Self {
            entry_draws: VecDeque::new(),
            default_entry: entry,
            uniform_value: 1,
            exponential_value: 1.0,
            entry_draws_taken: 0,
        }
    }

    /// Serve these entry draws first, in order.
    pub fn with_entry_sequence(mut self, draws: impl IntoIterator<Item = u8>) -> Self {
        self.entry_draws.extend(draws);
        self
    }

    /// Set the value returned (after clamping) by uniform draws.
    pub fn with_uniform(mut self, value: u64) -> Self {
        self.uniform_value = value;
        self
    }

    /// Set the value returned by exponential draws.
    pub fn with_exponential(mut self, value: f64) -> Self {
        self.exponential_value = value;
        self
    }

    /// Number of entry draws served so far.
    pub fn entry_draws_taken(&self) -> usize {
        self.entry_draws_taken
    }
}

impl Sampler for ScriptedSampler {
    fn exponential(&mut self, _lambda: f64) -> f64 {
        self.exponential_value
    }

    fn uniform(&mut self, low: u64, high: u64) -> u64 {
        self.uniform_value.clamp(low, high.max(low))
    }

    fn entry_draw(&mut self) -> u8 {
        self.entry_draws_taken += 1;
        self.entry_draws.pop_front().unwrap_or(self.default_entry)
    }
}
