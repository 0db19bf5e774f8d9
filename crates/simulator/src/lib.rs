//! Scheduling Simulator
//!
//! A command-line simulator built on top of the simulation framework.
//! Generates a synthetic process population, schedules it tick by tick and
//! reports per-priority statistics.
//!
//! # Architecture
//!
//! The simulator builds on `schedsim-simulation` to provide:
//!
//! - **Configuration**: rates, population size, entry threshold and token count
//! - **Transcript**: the per-tick log written to a file
//! - **Metrics Collection**: turnaround, waiting and blocked percentiles
//! - **Report**: one summary line per priority level
//!
//! # Example
//!
//! ```ignore
//! use schedsim_simulation::Rates;
//! use schedsim_simulator::{Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig::new(Rates::new(1.0, 0.1, 0.5), 100, 50, 4)
//!     .with_seed(12345)
//!     .with_transcript_path("running_state.log");
//!
//! let report = Simulator::new(config)?.run()?;
//! for line in report.priority_lines() {
//!     println!("{}", line);
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod runner;

pub use config::{SimulatorConfig, DEFAULT_TRANSCRIPT_PATH};
pub use error::SimulatorError;
pub use metrics::{MetricsCollector, MetricsSummary, Percentiles};
pub use report::SimulatorReport;
pub use runner::Simulator;
