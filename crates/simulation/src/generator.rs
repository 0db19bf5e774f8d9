//! Synthetic process population.

use crate::{ConfigError, SimulationError};
use schedsim_core::Sampler;
use schedsim_types::{Pid, Priority, Process};
use tracing::debug;

/// Rate parameters of the exponential distributions used for generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    /// Rate of the gap between consecutive arrivals.
    pub arrival: f64,
    /// Rate of the lifetime duration.
    pub lifetime: f64,
    /// Rate of the per-visit critical-section duration.
    pub cs_time: f64,
}

impl Rates {
    /// Create a rate set.
    pub fn new(arrival: f64, lifetime: f64, cs_time: f64) -> Self {
        Self {
            arrival,
            lifetime,
            cs_time,
        }
    }

    /// Reject zero, negative or non-finite rates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("arrival", self.arrival),
            ("lifetime", self.lifetime),
            ("critical-section", self.cs_time),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }
        Ok(())
    }
}

/// Generates processes with exponential arrival gaps, lifetimes and
/// critical-section durations, and uniform priorities.
#[derive(Debug, Clone)]
pub struct ProcessGenerator {
    rates: Rates,
}

impl ProcessGenerator {
    /// Create a generator, validating the rates up front.
    pub fn new(rates: Rates) -> Result<Self, ConfigError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    /// Generate `total` processes with pids `0..total`.
    ///
    /// Arrival times are cumulative: each process arrives an exponential gap
    /// after the previous one. Lifetimes are absolute (arrival + duration).
    pub fn generate(
        &self,
        total: u32,
        sampler: &mut impl Sampler,
    ) -> Result<Vec<Process>, SimulationError> {
        let mut processes = Vec::with_capacity(total as usize);
        let mut clock = 0.0;

        for pid in 0..total {
            let level = sampler.uniform(1, u64::from(Priority::LEVELS));
            let priority = Priority::new(u8::try_from(level).unwrap_or(u8::MAX))?;

            let arrival_time = clock + sampler.exponential(self.rates.arrival);
            clock = arrival_time;

            let lifetime = arrival_time + sampler.exponential(self.rates.lifetime);
            let cs_time = sampler.exponential(self.rates.cs_time);

            processes.push(Process::new(
                Pid(pid),
                priority,
                arrival_time,
                lifetime,
                cs_time,
            ));
        }

        debug!(total, last_arrival = clock, "generated process population");
        Ok(processes)
    }
}
