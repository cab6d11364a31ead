//! Diagnostic sink for informational and warning messages.
//!
//! The parser never fails through this channel: hard errors are returned as
//! [`crate::Error`] values. Everything the parser can recover from — skipped
//! lines, resynchronized courses, dropped events — is reported here instead,
//! tagged with the 1-based input line it refers to.

use serde::Serialize;
use std::io::Write;

/// Severity of a diagnostic message. There is no error severity by design;
/// hard failures travel through the parse call's own `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Progress/trace information.
    Info,
    /// A recoverable anomaly in the input.
    Warning,
}

/// A single diagnostic message with its originating input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// 1-based input line the message refers to (0 before the first line).
    pub line: u32,
    pub message: String,
}

/// Receiver for parser diagnostics.
pub trait DiagnosticSink {
    /// Reports progress/trace information.
    fn info(&mut self, line: u32, message: &str);

    /// Reports a recoverable anomaly.
    fn warning(&mut self, line: u32, message: &str);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn info(&mut self, line: u32, message: &str) {
        (**self).info(line, message);
    }

    fn warning(&mut self, line: u32, message: &str) {
        (**self).warning(line, message);
    }
}

/// Sink forwarding to the [`log`] crate facade. The host program picks the
/// actual backend (e.g. `env_logger`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn info(&mut self, line: u32, message: &str) {
        log::info!("line {line}: {message}");
    }

    fn warning(&mut self, line: u32, message: &str) {
        log::warn!("line {line}: {message}");
    }
}

/// Sink writing one formatted line per diagnostic to any [`Write`]
/// destination. Write failures are ignored; diagnostics are best-effort.
#[derive(Debug)]
pub struct WriteSink<W: Write> {
    out: W,
}

impl<W: Write> WriteSink<W> {
    /// Creates a sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticSink for WriteSink<W> {
    fn info(&mut self, line: u32, message: &str) {
        let _ = writeln!(self.out, "I line {line}: {message}");
    }

    fn warning(&mut self, line: u32, message: &str) {
        let _ = writeln!(self.out, "W line {line}: {message}");
    }
}

/// Sink collecting diagnostics in memory, for tests and batch reporting.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub entries: Vec<Diagnostic>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected warnings only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

impl DiagnosticSink for MemorySink {
    fn info(&mut self, line: u32, message: &str) {
        self.entries.push(Diagnostic {
            severity: Severity::Info,
            line,
            message: message.to_string(),
        });
    }

    fn warning(&mut self, line: u32, message: &str) {
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            line,
            message: message.to_string(),
        });
    }
}
