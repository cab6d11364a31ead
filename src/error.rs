//! Error types for the unrepy library.

use std::io;
use thiserror::Error;

/// Result type alias for unrepy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for unrepy parsing.
///
/// Every variant that originates inside the parse loop carries the 1-based
/// line number of the offending input line. [`Error::Context`] wraps a nested
/// failure with a description of the parse step that was in progress, so the
/// rendered message reads outermost-step-first, e.g.
/// `failed to parse the course metadata block: line 17: unexpected end of
/// input while parsing the course metadata block`.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading the line stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required structural line did not match its expected literal.
    #[error("line {line}: expected {expected:?}, got {actual:?}")]
    UnexpectedLine {
        line: u32,
        expected: String,
        actual: String,
    },

    /// A line did not match the grammar the current parse state requires.
    #[error("line {line}: {text:?} does not match the {kind} grammar")]
    GrammarMismatch {
        line: u32,
        kind: &'static str,
        text: String,
    },

    /// A field that must be numeric failed strict numeric parsing.
    #[error("line {line}: invalid number {text:?}")]
    InvalidNumber { line: u32, text: String },

    /// A symbol-table lookup (weekday letter, group type, hour descriptor)
    /// failed.
    #[error("line {line}: unknown {kind} {token:?}")]
    UnknownSymbol {
        line: u32,
        kind: &'static str,
        token: String,
    },

    /// The input ended inside a construct that requires more lines.
    #[error("line {line}: unexpected end of input while {context}")]
    UnexpectedEof { line: u32, context: &'static str },

    /// The cursor was advanced past end of input more times than the retry
    /// bound allows. This indicates a parser bug (a spinning loop), not a
    /// problem with the input data.
    #[error("line {line}: advanced past end of input too many times")]
    CursorStuck { line: u32 },

    /// A time-of-day string was not of the form `HH.MM` / `HH:MM`.
    #[error("invalid time of day {0:?}")]
    InvalidTimeOfDay(String),

    /// A nested failure wrapped with the parse step that was in progress.
    #[error("{context}: {source}")]
    Context {
        context: &'static str,
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps this error with a description of the enclosing parse step.
    pub fn context(self, context: &'static str) -> Self {
        Error::Context {
            context,
            source: Box::new(self),
        }
    }

    /// Returns the input line number closest to the failure, walking through
    /// any wrapping context frames.
    pub fn line(&self) -> Option<u32> {
        match self {
            Error::Io(_) | Error::InvalidTimeOfDay(_) => None,
            Error::UnexpectedLine { line, .. }
            | Error::GrammarMismatch { line, .. }
            | Error::InvalidNumber { line, .. }
            | Error::UnknownSymbol { line, .. }
            | Error::UnexpectedEof { line, .. }
            | Error::CursorStuck { line } => Some(*line),
            Error::Context { source, .. } => source.line(),
        }
    }
}

/// Extension adding [`Error::context`] wrapping to `Result`.
pub(crate) trait ResultExt<T> {
    fn context(self, context: &'static str) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|e| e.context(context))
    }
}
