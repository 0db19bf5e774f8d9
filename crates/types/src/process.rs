//! Simulated process record.

use crate::{Pid, Priority, Tick, TokenId};

/// A simulated job.
///
/// Identity and scheduling attributes are fixed at generation time. The
/// remaining fields are simulation state, zeroed at creation and updated by
/// the scheduler while the process moves between containers.
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    /// Unique process identifier.
    pub pid: Pid,
    /// Scheduling priority (lower level wins).
    pub priority: Priority,
    /// Instant at which the process becomes eligible to run.
    pub arrival_time: f64,
    /// Absolute expiry instant (arrival plus sampled duration).
    pub lifetime: f64,

    /// Ticks actually executed.
    pub time_slots_running: u64,
    /// Tick of first scheduling.
    pub start_time: Option<Tick>,
    /// Tick at which the process expired.
    pub end_time: Option<Tick>,
    /// Ticks spent ready but not running.
    pub waiting_time: u64,
    /// Ticks charged for wanting a critical section it could not get.
    pub blocked_time: u64,

    /// Critical-section ticks to accumulate per visit.
    pub cs_time: f64,
    /// Progress through the current critical-section visit.
    pub cs_time_executed: u64,
    /// Last sampled entry draw (0..=100).
    pub cs_enter_probability: u8,
    /// Token assigned for the current critical-section visit.
    pub held_token: Option<TokenId>,
}

impl Process {
    /// Create a process with all simulation state zeroed.
    pub fn new(
        pid: Pid,
        priority: Priority,
        arrival_time: f64,
        lifetime: f64,
        cs_time: f64,
    ) -> Self {
        Self {
            pid,
            priority,
            arrival_time,
            lifetime,
            time_slots_running: 0,
            start_time: None,
            end_time: None,
            waiting_time: 0,
            blocked_time: 0,
            cs_time,
            cs_time_executed: 0,
            cs_enter_probability: 0,
            held_token: None,
        }
    }

    /// Check whether the process has arrived by tick `now`.
    pub fn has_arrived(&self, now: Tick) -> bool {
        self.arrival_time <= now as f64
    }

    /// Check whether the process has outlived its lifetime at tick `now`.
    pub fn is_expired(&self, now: Tick) -> bool {
        self.lifetime <= now as f64
    }

    /// Check whether the current critical-section visit still needs ticks.
    pub fn wants_critical_section(&self) -> bool {
        (self.cs_time_executed as f64) < self.cs_time
    }

    /// Ticks from the first slot at or after arrival to expiry.
    ///
    /// Returns `None` until the process has been finished.
    pub fn turnaround(&self) -> Option<Tick> {
        let end = self.end_time?;
        let arrived = self.arrival_time.ceil().max(0.0) as Tick;
        Some(end.saturating_sub(arrived))
    }
}
