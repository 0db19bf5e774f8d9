//! Scheduling Simulator CLI
//!
//! Runs one simulation and prints per-priority statistics to stdout. The
//! per-tick transcript goes to a file; diagnostics go to stderr.

use clap::{CommandFactory, Parser};
use schedsim_simulation::Rates;
use schedsim_simulator::{Simulator, SimulatorConfig, SimulatorError, DEFAULT_TRANSCRIPT_PATH};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "schedsim")]
#[command(about = "Discrete-time priority scheduling simulator with critical-section contention")]
#[command(version)]
struct Cli {
    /// Rate of the exponential gap between arrivals
    lambda_arrival: f64,

    /// Rate of the exponential lifetime duration
    lambda_lifetime: f64,

    /// Rate of the exponential critical-section duration
    lambda_cs_time: f64,

    /// Number of processes to generate
    total_processes: u32,

    /// Critical-section entry threshold (0-100, lower means easier entry)
    k: u8,

    /// Number of contention tokens
    semaphores: usize,

    /// Random seed (defaults to one derived from the wall clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Transcript output file
    #[arg(long, default_value = DEFAULT_TRANSCRIPT_PATH)]
    transcript: PathBuf,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

impl Cli {
    fn into_config(self, seed: u64) -> SimulatorConfig {
        SimulatorConfig::new(
            Rates::new(self.lambda_arrival, self.lambda_lifetime, self.lambda_cs_time),
            self.total_processes,
            self.k,
            self.semaphores,
        )
        .with_seed(seed)
        .with_transcript_path(self.transcript)
    }
}

/// Exit status for a rejected command line.
///
/// `--help` and `--version` surface as errors that print to stdout and succeed.
fn parse_failure_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(parse_failure_code(&err));
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!(seed, "using seed");

    let report = match Simulator::new(cli.into_config(seed)).and_then(|sim| sim.run()) {
        Ok(report) => report,
        Err(err) => {
            error!(%err, "simulation failed");
            eprintln!("schedsim: {}", err);
            if matches!(err, SimulatorError::Config(_)) {
                eprintln!("{}", Cli::command().render_usage());
            }
            return ExitCode::FAILURE;
        }
    };

    for line in report.priority_lines() {
        println!("{}", line);
    }
    ExitCode::SUCCESS
}
