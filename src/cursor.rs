//! Line cursor over the decoded report.
//!
//! The cursor is the single mutable position shared by every parsing
//! routine: the current line, a 1-based line counter for diagnostics, and an
//! end-of-input flag. Decoding the legacy 8-bit source into text lines is the
//! caller's concern; the cursor only consumes an already-decoded stream.

use crate::error::{Error, Result};
use std::io;

/// Advancing past end of input more than this many times is a parser bug
/// (a loop failing to terminate), escalated to [`Error::CursorStuck`].
const MAX_EOF_HITS: u32 = 10;

/// Cursor over a lazily-produced sequence of decoded text lines.
///
/// Before the first [`advance`](Self::advance) the current text is empty and
/// the line counter is 0. After end of input the current text is empty again;
/// reaching end of input is a signal ("no more faculties"), not an error.
#[derive(Debug)]
pub struct LineCursor<I> {
    lines: I,
    current: String,
    line: u32,
    eof_hits: u32,
    eof: bool,
}

impl<I> LineCursor<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    /// Creates a cursor over a line stream.
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            current: String::new(),
            line: 0,
            eof_hits: 0,
            eof: false,
        }
    }

    /// Advances to the next line. Returns `Ok(false)` at end of input.
    pub fn advance(&mut self) -> Result<bool> {
        match self.lines.next() {
            Some(Ok(text)) => {
                self.current = text;
                self.line += 1;
                Ok(true)
            }
            Some(Err(e)) => Err(Error::Io(e)),
            None => {
                if self.eof_hits > MAX_EOF_HITS {
                    return Err(Error::CursorStuck { line: self.line });
                }
                self.eof_hits += 1;
                self.eof = true;
                self.current.clear();
                Ok(false)
            }
        }
    }

    /// The current line's text (empty before the first advance and after end
    /// of input).
    pub fn text(&self) -> &str {
        &self.current
    }

    /// 1-based number of the current line, for diagnostics.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Whether end of input has been reached.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// How many times the cursor has been advanced past end of input.
    pub fn eof_hits(&self) -> u32 {
        self.eof_hits
    }
}
