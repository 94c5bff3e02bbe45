//! Line source abstraction.
//!
//! The [`LineSource`] trait decouples the interpreter from stdin so the
//! session can be driven from any buffered reader (tests feed byte slices).

use std::borrow::Cow;
use std::io::{BufRead, Read};

use crate::error::LineError;

/// Buffer size for one line, terminator included. At most
/// `MAX_LINE_SIZE - 1` bytes are read per line.
pub const MAX_LINE_SIZE: usize = 2048;

/// One line as read from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Raw line content without its terminator, echoed as-is.
    pub bytes: Vec<u8>,
}

impl Line {
    /// The line decoded for tokenizing. Invalid UTF-8 becomes U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// A fatal read: the raw bytes read so far (for echoing) and the cause.
#[derive(Debug)]
pub struct ReadFailure {
    pub partial: Vec<u8>,
    pub error: LineError,
}

/// Source of input lines for a session.
pub trait LineSource {
    /// Read the next terminated line.
    fn next_line(&mut self) -> Result<Line, ReadFailure>;
}

/// Reads lines from any [`BufRead`], enforcing [`MAX_LINE_SIZE`].
pub struct ReaderSource<R> {
    reader: R,
    limit: usize,
}

impl<R: BufRead> ReaderSource<R> {
    /// Read from `reader` with the default [`MAX_LINE_SIZE`] limit.
    pub fn new(reader: R) -> Self {
        Self::with_limit(reader, MAX_LINE_SIZE)
    }

    /// `limit` is the buffer size, terminator included.
    pub fn with_limit(reader: R, limit: usize) -> Self {
        ReaderSource {
            reader,
            limit: limit.max(2),
        }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Line, ReadFailure> {
        let mut buf = Vec::new();
        let max_read = (self.limit - 1) as u64;
        let read = (&mut self.reader).take(max_read).read_until(b'\n', &mut buf);

        if let Err(e) = read {
            return Err(ReadFailure {
                partial: buf,
                error: LineError::Io(e),
            });
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            return Ok(Line { bytes: buf });
        }

        let error = if buf.len() as u64 >= max_read {
            LineError::TooLong { limit: self.limit }
        } else {
            LineError::EndOfInput
        };
        Err(ReadFailure {
            partial: buf,
            error,
        })
    }
}
