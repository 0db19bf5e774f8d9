//! Error types for the simulation.

use schedsim_pqueue::InvalidOperation;
use schedsim_semaphore::TokenError;
use schedsim_types::InvalidPriority;
use thiserror::Error;

/// Rejected simulation parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Rate parameter is zero, negative or not finite.
    #[error("{name} rate must be positive and finite, got {value}")]
    InvalidRate {
        /// Which rate.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Entry threshold outside 0..=100.
    #[error("critical-section threshold k must be in 0..=100, got {0}")]
    InvalidThreshold(u8),

    /// Token pool would be empty.
    #[error("semaphore count must be at least 1")]
    NoSemaphores,
}

/// Errors while running a simulation.
///
/// Apart from `Transcript`, these indicate a broken internal contract
/// rather than a condition a caller is expected to handle.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Priority queue contract violated.
    #[error("queue contract violated: {0}")]
    Queue(#[from] InvalidOperation),

    /// Token pool contract violated.
    #[error("token pool contract violated: {0}")]
    Token(#[from] TokenError),

    /// Sampler produced a priority outside the valid range.
    #[error("generated priority rejected: {0}")]
    Priority(#[from] InvalidPriority),

    /// Invalid parameters.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Writing the transcript failed.
    #[error("transcript write failed: {0}")]
    Transcript(#[from] std::io::Error),
}
