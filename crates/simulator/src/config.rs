//! Configuration types for the simulator.

use schedsim_simulation::{ConfigError, Rates, SchedulerConfig};
use std::path::PathBuf;

/// Default transcript file, relative to the working directory.
pub const DEFAULT_TRANSCRIPT_PATH: &str = "running_state.log";

/// Configuration for a simulation run.
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Exponential rates for arrival gaps, lifetimes and critical-section time.
    pub rates: Rates,

    /// Number of processes to generate.
    pub total_processes: u32,

    /// Critical-section entry threshold `k` in 0..=100.
    pub cs_entry_threshold: u8,

    /// Number of contention tokens `S`.
    pub semaphores: usize,

    /// Random seed for deterministic simulation.
    pub seed: u64,

    /// Where the per-tick transcript is written.
    pub transcript_path: PathBuf,
}

impl SimulatorConfig {
    /// Create a new simulator configuration.
    pub fn new(
        rates: Rates,
        total_processes: u32,
        cs_entry_threshold: u8,
        semaphores: usize,
    ) -> Self {
        Self {
            rates,
            total_processes,
            cs_entry_threshold,
            semaphores,
            seed: 12345,
            transcript_path: PathBuf::from(DEFAULT_TRANSCRIPT_PATH),
        }
    }

    /// Set the rates.
    pub fn with_rates(mut self, rates: Rates) -> Self {
        self.rates = rates;
        self
    }

    /// Set the number of processes.
    pub fn with_total_processes(mut self, total: u32) -> Self {
        self.total_processes = total;
        self
    }

    /// Set the critical-section entry threshold.
    pub fn with_cs_entry_threshold(mut self, k: u8) -> Self {
        self.cs_entry_threshold = k;
        self
    }

    /// Set the number of contention tokens.
    pub fn with_semaphores(mut self, semaphores: usize) -> Self {
        self.semaphores = semaphores;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the transcript path.
    pub fn with_transcript_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.transcript_path = path.into();
        self
    }

    /// Scheduler parameters derived from this configuration.
    pub fn to_scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig::new(self.cs_entry_threshold, self.semaphores)
    }

    /// Check every parameter before anything is generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rates.validate()?;
        self.to_scheduler_config().validate()
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new(Rates::new(1.0, 0.1, 0.5), 100, 50, 4)
    }
}
