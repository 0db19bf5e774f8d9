//! Final report of a simulator run.

use crate::MetricsSummary;
use schedsim_simulation::{BucketStats, SimulationReport, SimulationStats};
use schedsim_types::Priority;
use std::fmt;

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct SimulatorReport {
    /// Seed the run used.
    pub seed: u64,
    /// Scheduler outcome.
    pub simulation: SimulationReport,
    /// Runner counters.
    pub stats: SimulationStats,
    /// Per-process distributions.
    pub metrics: MetricsSummary,
}

impl SimulatorReport {
    /// One summary line per priority level, highest priority first.
    pub fn priority_lines(&self) -> Vec<String> {
        self.simulation
            .stats
            .iter()
            .map(|(priority, bucket)| PriorityLine { priority, bucket }.to_string())
            .collect()
    }
}

struct PriorityLine<'a> {
    priority: Priority,
    bucket: &'a BucketStats,
}

impl fmt::Display for PriorityLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Waiting for: {}, Blocked for: {}, Running for: {}, Critical section for: {} \
             time slots for processes with priority: {}",
            self.bucket.waiting,
            self.bucket.blocked,
            self.bucket.running,
            self.bucket.critical_section,
            self.priority
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedsim_simulation::PriorityStats;

    #[test]
    fn test_priority_lines() {
        let mut stats = PriorityStats::new();
        let bucket = stats.bucket_mut(Priority::new(3).unwrap());
        bucket.waiting = 4;
        bucket.blocked = 1;
        bucket.running = 9;
        bucket.critical_section = 2;

        let report = SimulatorReport {
            seed: 0,
            simulation: SimulationReport {
                stats,
                ticks: 10,
                completed: Vec::new(),
            },
            stats: SimulationStats::default(),
            metrics: MetricsSummary::default(),
        };

        let lines = report.priority_lines();
        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            "Waiting for: 0, Blocked for: 0, Running for: 0, Critical section for: 0 \
             time slots for processes with priority: 1"
        );
        assert_eq!(
            lines[2],
            "Waiting for: 4, Blocked for: 1, Running for: 9, Critical section for: 2 \
             time slots for processes with priority: 3"
        );
    }
}
