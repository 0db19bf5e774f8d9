//! Actions emitted by the scheduler.

use schedsim_types::Pid;
use std::fmt;

/// Observable outcome of a scheduling tick.
///
/// The state machine performs no I/O. It returns these and the runner
/// writes them to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The running process reached its lifetime and left the CPU.
    Finishing {
        /// Process that finished.
        pid: Pid,
    },

    /// A process occupied the CPU for this tick.
    Running {
        /// Process that ran.
        pid: Pid,
        /// Ticks executed so far, including this one.
        service_time: u64,
    },
}

impl Action {
    /// Get a human-readable name for this action type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::Finishing { .. } => "Finishing",
            Action::Running { .. } => "Running",
        }
    }

    /// Process the action refers to.
    pub fn pid(&self) -> Pid {
        match self {
            Action::Finishing { pid } | Action::Running { pid, .. } => *pid,
        }
    }
}

/// Transcript line format.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Finishing { pid } => write!(f, "Finishing now Process with PID: {}", pid),
            Action::Running { pid, service_time } => write!(
                f,
                "Running now Process with PID: {}, Current Service Time: {}",
                pid, service_time
            ),
        }
    }
}
