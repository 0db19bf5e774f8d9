//! Per-process distributions collected from finished processes.

use crate::SimulatorError;
use hdrhistogram::Histogram;
use schedsim_types::Process;
use tracing::info;

/// Percentile summary of one distribution, in ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Percentiles {
    /// Number of samples.
    pub count: u64,
    /// Median.
    pub p50: u64,
    /// 99th percentile.
    pub p99: u64,
    /// Largest sample.
    pub max: u64,
}

impl Percentiles {
    fn of(histogram: &Histogram<u64>) -> Self {
        if histogram.len() == 0 {
            return Self::default();
        }
        Self {
            count: histogram.len(),
            p50: histogram.value_at_quantile(0.50),
            p99: histogram.value_at_quantile(0.99),
            max: histogram.max(),
        }
    }
}

/// Collects turnaround, waiting and blocked ticks per finished process.
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    turnaround: Histogram<u64>,
    waiting: Histogram<u64>,
    blocked: Histogram<u64>,
}

impl MetricsCollector {
    /// Create empty, auto-resizing histograms with 3 significant figures.
    pub fn new() -> Result<Self, SimulatorError> {
        Ok(Self {
            turnaround: Histogram::new(3)?,
            waiting: Histogram::new(3)?,
            blocked: Histogram::new(3)?,
        })
    }

    /// Record one process. Processes without an end time are skipped.
    pub fn record(&mut self, process: &Process) -> Result<(), SimulatorError> {
        let Some(turnaround) = process.turnaround() else {
            return Ok(());
        };
        self.turnaround.record(turnaround)?;
        self.waiting.record(process.waiting_time)?;
        self.blocked.record(process.blocked_time)?;
        Ok(())
    }

    /// Summarise the distributions.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            turnaround: Percentiles::of(&self.turnaround),
            waiting: Percentiles::of(&self.waiting),
            blocked: Percentiles::of(&self.blocked),
        }
    }
}

/// Percentiles of every collected distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSummary {
    /// End tick minus first tick at or after arrival.
    pub turnaround: Percentiles,
    /// Ticks spent ready.
    pub waiting: Percentiles,
    /// Ticks charged for denied critical sections.
    pub blocked: Percentiles,
}

impl MetricsSummary {
    /// Log the summary at info level.
    pub fn log(&self) {
        for (name, p) in [
            ("turnaround", self.turnaround),
            ("waiting", self.waiting),
            ("blocked", self.blocked),
        ] {
            info!(
                metric = name,
                count = p.count,
                p50 = p.p50,
                p99 = p.p99,
                max = p.max,
                "process distribution"
            );
        }
    }
}
