//! Per-priority statistics.

use schedsim_types::{Priority, Process, Tick};

/// Tick counters for one priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketStats {
    /// Ticks spent ready but not running.
    pub waiting: u64,
    /// Ticks charged for a denied critical section.
    pub blocked: u64,
    /// Ticks on the CPU.
    pub running: u64,
    /// Ticks inside a critical section.
    pub critical_section: u64,
}

impl BucketStats {
    fn add(&mut self, other: &BucketStats) {
        self.waiting += other.waiting;
        self.blocked += other.blocked;
        self.running += other.running;
        self.critical_section += other.critical_section;
    }
}

/// Statistics keyed by priority level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityStats {
    buckets: [BucketStats; Priority::LEVELS as usize],
}

impl PriorityStats {
    /// Create zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for `priority`.
    pub fn bucket(&self, priority: Priority) -> &BucketStats {
        &self.buckets[priority.index()]
    }

    /// Mutable counters for `priority`.
    pub fn bucket_mut(&mut self, priority: Priority) -> &mut BucketStats {
        &mut self.buckets[priority.index()]
    }

    /// Iterate over levels, highest priority first.
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &BucketStats)> + '_ {
        Priority::all().zip(self.buckets.iter())
    }

    /// Sum over all levels.
    pub fn totals(&self) -> BucketStats {
        let mut total = BucketStats::default();
        for bucket in &self.buckets {
            total.add(bucket);
        }
        total
    }
}

/// Final outcome of a scheduling run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Per-priority tick counters.
    pub stats: PriorityStats,
    /// Ticks executed.
    pub ticks: Tick,
    /// Finished processes in completion order.
    pub completed: Vec<Process>,
}
