//! Core traits for state machines.

use crate::Action;
use schedsim_types::Tick;

/// Source of random draws used by the simulation.
///
/// Every draw goes through this trait so a run is reproducible from its seed
/// and tests can script exact outcomes.
pub trait Sampler {
    /// Draw from an exponential distribution with rate `lambda`.
    fn exponential(&mut self, lambda: f64) -> f64;

    /// Draw a uniform integer in `low..=high`.
    fn uniform(&mut self, low: u64, high: u64) -> u64;

    /// Draw a critical-section entry value in `0..=100`.
    fn entry_draw(&mut self) -> u8 {
        // uniform(0, 100) always fits
        self.uniform(0, 100).min(100) as u8
    }
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    fn exponential(&mut self, lambda: f64) -> f64 {
        (**self).exponential(lambda)
    }

    fn uniform(&mut self, low: u64, high: u64) -> u64 {
        (**self).uniform(low, high)
    }

    fn entry_draw(&mut self) -> u8 {
        (**self).entry_draw()
    }
}

/// A discrete-time state machine advanced one tick at a time.
///
/// Implementations are:
///
/// - **Synchronous**: `step` never blocks
/// - **Deterministic**: same state + same draws = same actions
/// - **No I/O**: the runner records the returned actions
pub trait StateMachine {
    /// Error for contract violations detected while stepping.
    type Error;

    /// Execute the tick at [`now`](Self::now) and advance the clock.
    ///
    /// # Returns
    ///
    /// The actions produced during the tick, in the order they happened.
    fn step(&mut self, sampler: &mut impl Sampler) -> Result<Vec<Action>, Self::Error>;

    /// The tick that the next `step` will execute.
    fn now(&self) -> Tick;

    /// Check whether the terminal condition has been reached.
    fn is_finished(&self) -> bool;
}
