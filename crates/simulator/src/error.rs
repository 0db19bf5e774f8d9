//! Simulator errors.

use schedsim_simulation::{ConfigError, SimulationError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a simulator run.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// Rejected parameters.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Transcript file could not be opened or written.
    #[error("transcript {}: {source}", path.display())]
    Transcript {
        /// Transcript location.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Scheduler contract violated.
    #[error(transparent)]
    Simulation(SimulationError),

    /// Histogram could not be created.
    #[error("histogram setup failed: {0}")]
    HistogramCreation(#[from] hdrhistogram::CreationError),

    /// Sample rejected by a histogram.
    #[error("histogram record failed: {0}")]
    HistogramRecord(#[from] hdrhistogram::RecordError),
}

impl SimulatorError {
    /// Attach the transcript path to transcript failures raised while running.
    pub(crate) fn from_simulation(error: SimulationError, path: &std::path::Path) -> Self {
        match error {
            SimulationError::Transcript(source) => SimulatorError::Transcript {
                path: path.to_path_buf(),
                source,
            },
            SimulationError::Config(config) => SimulatorError::Config(config),
            other => SimulatorError::Simulation(other),
        }
    }
}
