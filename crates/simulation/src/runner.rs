//! Drives a state machine to completion, recording its actions.

use crate::{SimulationError, TranscriptSink};
use schedsim_core::{Action, Sampler, StateMachine};
use schedsim_types::Tick;
use tracing::{debug, info, trace};

/// Counters collected while running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    /// Ticks executed.
    pub ticks: Tick,
    /// Ticks in which some process ran.
    pub running_ticks: u64,
    /// Ticks in which the CPU was idle.
    pub idle_ticks: u64,
    /// Processes retired while on the CPU.
    pub finishings: u64,
}

/// Steps a [`StateMachine`] with a sampler and forwards every action to a
/// transcript sink.
#[derive(Debug)]
pub struct SimulationRunner<M, S> {
    machine: M,
    sampler: S,
    stats: SimulationStats,
}

impl<M, S> SimulationRunner<M, S>
where
    M: StateMachine,
    M::Error: From<SimulationError>,
    S: Sampler,
{
    /// Create a runner.
    pub fn new(machine: M, sampler: S) -> Self {
        Self {
            machine,
            sampler,
            stats: SimulationStats::default(),
        }
    }

    /// Execute one tick.
    pub fn step(&mut self, sink: &mut impl TranscriptSink) -> Result<Vec<Action>, M::Error> {
        let actions = self.machine.step(&mut self.sampler)?;

        let mut ran = false;
        for action in &actions {
            match action {
                Action::Running { .. } => ran = true,
                Action::Finishing { .. } => self.stats.finishings += 1,
            }
            trace!(kind = action.type_name(), pid = %action.pid(), "recorded action");
            sink.record(action).map_err(SimulationError::from)?;
        }

        self.stats.ticks += 1;
        if ran {
            self.stats.running_ticks += 1;
        } else {
            self.stats.idle_ticks += 1;
        }
        Ok(actions)
    }

    /// Step until the machine reports it is finished, then flush the sink.
    pub fn run(&mut self, sink: &mut impl TranscriptSink) -> Result<SimulationStats, M::Error> {
        info!(start = self.machine.now(), "simulation started");

        while !self.machine.is_finished() {
            self.step(sink)?;
            if self.stats.ticks % 10_000 == 0 {
                debug!(tick = self.machine.now(), "progress");
            }
        }
        sink.flush().map_err(SimulationError::from)?;

        info!(
            ticks = self.stats.ticks,
            running = self.stats.running_ticks,
            idle = self.stats.idle_ticks,
            "simulation finished"
        );
        Ok(self.stats)
    }

    /// The machine being driven.
    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// Consume the runner, returning the machine.
    pub fn into_machine(self) -> M {
        self.machine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        MemoryTranscript, NullTranscript, ProcessGenerator, Rates, Scheduler, SchedulerConfig,
        SeededSampler,
    };
    use schedsim_types::{Pid, Priority, Process};
    use tracing_test::traced_test;

    fn scheduler(seed: u64) -> (Scheduler, SeededSampler) {
        let mut sampler = SeededSampler::seeded(seed);
        let processes = ProcessGenerator::new(Rates::new(0.5, 0.1, 0.5))
            .unwrap()
            .generate(30, &mut sampler)
            .unwrap();
        let scheduler = Scheduler::new(SchedulerConfig::new(50, 2), processes).unwrap();
        (scheduler, sampler)
    }

    #[test]
    #[traced_test]
    fn test_run_to_completion() {
        let (machine, sampler) = scheduler(5);
        let mut runner = SimulationRunner::new(machine, sampler);
        let mut transcript = MemoryTranscript::new();

        let stats = runner.run(&mut transcript).unwrap();

        assert!(runner.machine().is_finished());
        assert_eq!(stats.ticks, runner.machine().now());
        assert_eq!(stats.running_ticks + stats.idle_ticks, stats.ticks);
        let finishings = transcript
            .actions()
            .iter()
            .filter(|a| matches!(a, Action::Finishing { .. }))
            .count() as u64;
        assert_eq!(stats.finishings, finishings);

        let report = runner.into_machine().into_report();
        assert_eq!(report.completed.len(), 30);
        assert_eq!(report.stats.totals().running, stats.running_ticks);
        assert!(logs_contain("simulation finished"));
        assert!(logs_contain("recorded action"));
    }

    #[test]
    fn test_same_seed_same_transcript() {
        let transcript = |seed: u64| {
            let (machine, sampler) = scheduler(seed);
            let mut runner = SimulationRunner::new(machine, sampler);
            let mut transcript = MemoryTranscript::new();
            runner.run(&mut transcript).unwrap();
            transcript.render()
        };

        assert_eq!(transcript(21), transcript(21));
        assert_ne!(transcript(21), transcript(22));
    }

    #[test]
    fn test_idle_ticks_before_first_arrival() {
        let p = Process::new(Pid(0), Priority::HIGHEST, 2.5, 4.0, 0.0);
        let machine = Scheduler::new(SchedulerConfig::new(100, 1), vec![p]).unwrap();
        let mut runner = SimulationRunner::new(machine, SeededSampler::seeded(0));

        let stats = runner.run(&mut NullTranscript).unwrap();

        // Idle at 0..=2, runs at 3, finishes at 4
        assert_eq!(
            stats,
            SimulationStats {
                ticks: 5,
                running_ticks: 1,
                idle_ticks: 4,
                finishings: 1,
            }
        );
    }
}
