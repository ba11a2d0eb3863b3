//! Console output: a bounded transcript with an optional external sink.
//!
//! Lines written before a sink is attached are buffered and flushed into
//! the sink exactly once at attach time, so early startup output (module
//! indexing, host banners) is not lost.

use ember_types::Severity;

/// One line of console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub severity: Severity,
    pub text: String,
}

/// External surface for console lines: a UI overlay, stdout, a logger.
pub trait OutputSink {
    fn line(&mut self, severity: Severity, text: &str);
}

/// Forwards console lines to the `log` facade by severity.
pub struct LogSink;

impl OutputSink for LogSink {
    fn line(&mut self, severity: Severity, text: &str) {
        match severity {
            Severity::Info => log::info!(target: "console", "{text}"),
            Severity::Warning => log::warn!(target: "console", "{text}"),
            Severity::Error => log::error!(target: "console", "{text}"),
        }
    }
}

/// Line buffer the console writes into.
pub struct ConsoleOutput {
    transcript: Vec<OutputLine>,
    transcript_limit: usize,
    /// Lines written while no sink is attached, replayed once at attach.
    pending: Vec<OutputLine>,
    sink: Option<Box<dyn OutputSink>>,
}

impl ConsoleOutput {
    pub fn new(transcript_limit: usize) -> Self {
        Self {
            transcript: Vec::new(),
            transcript_limit,
            pending: Vec::new(),
            sink: None,
        }
    }

    /// Append a line to the transcript and mirror it to the sink (or queue
    /// it until one exists).
    pub fn write(&mut self, severity: Severity, text: &str) {
        let line = OutputLine {
            severity,
            text: text.to_string(),
        };
        match &mut self.sink {
            Some(sink) => sink.line(severity, text),
            None => self.pending.push(line.clone()),
        }
        self.transcript.push(line);
        if self.transcript.len() > self.transcript_limit {
            let excess = self.transcript.len() - self.transcript_limit;
            self.transcript.drain(..excess);
        }
    }

    /// Attach the sink and flush everything written so far into it.
    pub fn attach_sink(&mut self, mut sink: Box<dyn OutputSink>) {
        for line in self.pending.drain(..) {
            sink.line(line.severity, &line.text);
        }
        self.sink = Some(sink);
    }

    /// The transcript, oldest first. This is what an overlay renders.
    pub fn lines(&self) -> &[OutputLine] {
        &self.transcript
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
    }
}
