//! Simulator: generates a population, runs the scheduler and builds the report.

use crate::{MetricsCollector, SimulatorConfig, SimulatorError, SimulatorReport};
use schedsim_simulation::{
    ProcessGenerator, Scheduler, SeededSampler, SimulationRunner, TranscriptSink, WriterTranscript,
};
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

/// A configured simulation, ready to run.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    generator: ProcessGenerator,
}

impl Simulator {
    /// Validate the configuration and create a simulator.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulatorError> {
        config.validate()?;
        let generator = ProcessGenerator::new(config.rates)?;
        Ok(Self { config, generator })
    }

    /// Run with the transcript written to the configured path.
    ///
    /// The file is created or truncated before the first tick.
    pub fn run(&self) -> Result<SimulatorReport, SimulatorError> {
        let path = &self.config.transcript_path;
        let file = File::create(path).map_err(|source| SimulatorError::Transcript {
            path: path.clone(),
            source,
        })?;
        let mut transcript = WriterTranscript::new(BufWriter::new(file));
        self.run_with(&mut transcript)
    }

    /// Run with the transcript written to `sink`.
    pub fn run_with(
        &self,
        sink: &mut impl TranscriptSink,
    ) -> Result<SimulatorReport, SimulatorError> {
        let config = &self.config;
        info!(
            seed = config.seed,
            total_processes = config.total_processes,
            k = config.cs_entry_threshold,
            semaphores = config.semaphores,
            "starting simulation"
        );

        let mut sampler = SeededSampler::seeded(config.seed);
        let processes = self
            .generator
            .generate(config.total_processes, &mut sampler)
            .map_err(|e| SimulatorError::from_simulation(e, &config.transcript_path))?;
        let scheduler = Scheduler::new(config.to_scheduler_config(), processes)?;

        let mut runner = SimulationRunner::new(scheduler, sampler);
        let stats = runner
            .run(sink)
            .map_err(|e| SimulatorError::from_simulation(e, &config.transcript_path))?;
        let simulation = runner.into_machine().into_report();

        let mut collector = MetricsCollector::new()?;
        for process in &simulation.completed {
            collector.record(process)?;
        }
        let metrics = collector.summary();
        metrics.log();

        info!(
            seed = config.seed,
            ticks = simulation.ticks,
            completed = simulation.completed.len(),
            "simulation complete"
        );

        Ok(SimulatorReport {
            seed: config.seed,
            simulation,
            stats,
            metrics,
        })
    }
}
