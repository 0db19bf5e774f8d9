//! Deterministic scheduling simulation.
//!
//! This crate provides the scheduler state machine and everything needed to
//! drive it reproducibly. Given the same seed and parameters, a run produces
//! an identical transcript and identical statistics.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  SimulationRunner                       │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Scheduler (StateMachine)                       │ │
//! │  │     pool → ready → CPU → finished                  │ │
//! │  │     TokenPool guards critical sections             │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │  draws                      │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Sampler (seeded ChaCha8 or scripted)           │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Actions → TranscriptSink                       │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick runs, in order: admission, expiry of the running process,
//! expiry sweep of the ready set, preemption, idle fill, execution of the
//! running process and waiting-time accrual.

mod error;
mod generator;
mod runner;
mod sampler;
mod scheduler;
mod stats;
mod transcript;

pub use error::{ConfigError, SimulationError};
pub use generator::{ProcessGenerator, Rates};
pub use runner::{SimulationRunner, SimulationStats};
pub use sampler::{RngSampler, ScriptedSampler, SeededSampler};
pub use scheduler::{
    arrival_order, completion_order, ready_order, Census, ProcessOrder, ProcessQueue, Scheduler,
    SchedulerConfig,
};
pub use stats::{BucketStats, PriorityStats, SimulationReport};
pub use transcript::{MemoryTranscript, NullTranscript, TranscriptSink, WriterTranscript};
