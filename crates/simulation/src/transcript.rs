//! Destinations for the per-tick transcript.

use schedsim_core::Action;
use std::io::{self, Write};

/// Receives every action the scheduler emits, one line each.
pub trait TranscriptSink {
    /// Record one action.
    fn record(&mut self, action: &Action) -> io::Result<()>;

    /// Flush buffered output.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes transcript lines to any [`Write`] implementor.
#[derive(Debug)]
pub struct WriterTranscript<W: Write> {
    writer: W,
    lines: u64,
}

impl<W: Write> WriterTranscript<W> {
    /// Wrap a writer. Callers should buffer it themselves if needed.
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Number of lines written.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TranscriptSink for WriterTranscript<W> {
    fn record(&mut self, action: &Action) -> io::Result<()> {
        writeln!(self.writer, "{}", action)?;
        self.lines += 1;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Keeps actions in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTranscript {
    actions: Vec<Action>,
}

impl MemoryTranscript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded actions in order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Render the transcript as it would appear on disk.
    pub fn render(&self) -> String {
        self.actions.iter().map(|a| format!("{}\n", a)).collect()
    }
}

impl TranscriptSink for MemoryTranscript {
    fn record(&mut self, action: &Action) -> io::Result<()> {
        self.actions.push(*action);
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranscript;

impl TranscriptSink for NullTranscript {
    fn record(&mut self, _action: &Action) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedsim_types::Pid;

    #[test]
    fn test_writer_transcript_lines() {
        let mut transcript = WriterTranscript::new(Vec::new());
        transcript
            .record(&Action::Running {
                pid: Pid(3),
                service_time: 1,
            })
            .unwrap();
        transcript.record(&Action::Finishing { pid: Pid(3) }).unwrap();
        transcript.flush().unwrap();

        assert_eq!(transcript.lines(), 2);
        let text = String::from_utf8(transcript.into_inner()).unwrap();
        assert_eq!(
            text,
            "Running now Process with PID: 3, Current Service Time: 1\n\
             Finishing now Process with PID: 3\n"
        );
    }

    #[test]
    fn test_memory_transcript_renders_like_writer() {
        let actions = [
            Action::Running {
                pid: Pid(0),
                service_time: 7,
            },
            Action::Finishing { pid: Pid(0) },
        ];
        let mut memory = MemoryTranscript::new();
        let mut writer = WriterTranscript::new(Vec::new());
        for action in &actions {
            memory.record(action).unwrap();
            writer.record(action).unwrap();
        }

        assert_eq!(memory.actions(), &actions);
        assert_eq!(memory.render().into_bytes(), writer.into_inner());
    }
}
